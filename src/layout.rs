//! Pure layout calculations for product pages.
//!
//! A product page is designed to print on one sheet. Its images share the
//! height left over after the title, the description block and the
//! navigation links, so pages with many images get smaller pictures.

use crate::config::LayoutConfig;

/// Largest height each image of a page may take.
///
/// The budget (`page_height - overhead`) is split evenly between `count`
/// images, truncated to one decimal and never below `min_image_height`.
/// With no images the whole budget is returned.
///
/// # Examples
/// ```
/// # use catalog_pages::config::LayoutConfig;
/// # use catalog_pages::layout::max_image_height;
/// let layout = LayoutConfig::default(); // 29.7 - 5.0 = 24.7
/// assert_eq!(max_image_height(1, &layout), 24.7);
/// assert_eq!(max_image_height(3, &layout), 8.2);
/// assert_eq!(max_image_height(9, &layout), 5.0);
/// ```
pub fn max_image_height(count: usize, layout: &LayoutConfig) -> f64 {
    let budget = layout.image_budget();
    if count == 0 {
        return budget;
    }
    // Tolerate representation error so 8.3 doesn't truncate to 8.2
    let tenths = (budget / count as f64 * 10.0 + 1e-9).floor();
    (tenths / 10.0).max(layout.min_image_height)
}

/// CSS length for a height in the layout's unit, e.g. `"8.2cm"`.
pub fn css_length(value: f64, layout: &LayoutConfig) -> String {
    format!("{}{}", value, layout.unit)
}
