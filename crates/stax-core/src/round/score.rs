/// Star rating for a won round. Fixed table, not configurable:
/// 20 seconds or faster earns 3 stars, 30 or faster earns 2, anything
/// slower earns 1.
pub fn star_rating(elapsed_seconds: u32) -> u32 {
    if elapsed_seconds <= 20 {
        3
    } else if elapsed_seconds <= 30 {
        2
    } else {
        1
    }
}
