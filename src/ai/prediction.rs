// Trajectory prediction for the automatic controller

/// Predict the ball's vertical position `lookahead` ticks ahead
///
/// Extrapolates the current vertical velocity in a straight line and folds the
/// result back off the side walls as many times as needed to land in
/// `[0, field_height]`.
///
/// # Arguments
/// * `ball_y` - Current ball centre
/// * `ball_vy` - Current vertical velocity (units per tick)
/// * `lookahead` - Ticks to extrapolate
/// * `field_height` - Height of the playing field
pub fn predict_ball_y(ball_y: f32, ball_vy: f32, lookahead: f32, field_height: f32) -> f32 {
    let raw = ball_y + ball_vy * lookahead;
    if !raw.is_finite() || field_height <= 0.0 {
        return field_height / 2.0;
    }

    // Reflection off two walls is periodic over twice the height
    let period = 2.0 * field_height;
    let folded = raw.rem_euclid(period);
    let predicted = if folded > field_height {
        period - folded
    } else {
        folded
    };

    predicted.clamp(0.0, field_height)
}
