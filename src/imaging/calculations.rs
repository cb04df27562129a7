//! Pure calculation functions for thumbnail dimensions.

/// Scale `source` down so its longer edge is `max_dim`, keeping the aspect
/// ratio. Images that already fit are returned unchanged; nothing is ever
/// upscaled. Neither edge rounds below one pixel.
///
/// # Examples
/// ```
/// # use photodisc::imaging::fit_within;
/// // 4000x3000 landscape into 300 → 300x225
/// assert_eq!(fit_within((4000, 3000), 300), (300, 225));
///
/// // already small enough
/// assert_eq!(fit_within((200, 100), 300), (200, 100));
/// ```
pub fn fit_within(source: (u32, u32), max_dim: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let longer_edge = src_w.max(src_h);
    if longer_edge <= max_dim || longer_edge == 0 {
        return source;
    }

    let ratio = max_dim as f64 / longer_edge as f64;
    let scale = |edge: u32| ((edge as f64 * ratio).round() as u32).max(1);
    if src_w >= src_h {
        (max_dim, scale(src_h))
    } else {
        (scale(src_w), max_dim)
    }
}
