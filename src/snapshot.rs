//! The markdown index, read back as the seed of the next run.
//!
//! The index is a fixed five-column table:
//!
//! ```text
//! # 王叔叔3D打印工坊产品介绍
//!
//! |序号|模型名称|模型尺寸|说明|链接地址|
//! |----|----|----|----|----|
//! |1|Cat|未知尺寸|这是一个Cat3D打印模型|[https://3d.lich.tech/1.html](https://3d.lich.tech/1.html)|
//! ```
//!
//! Parsing is line-based rather than a markdown parse: older indexes have
//! blank lines between rows, which would end a GFM table after its first row.
//! Anything that is not a row with a numeric first cell is ignored, so the
//! file can be hand-edited (sizes and descriptions are meant to be filled in
//! by hand).

use crate::catalog::Product;
use crate::config::CatalogConfig;
use std::collections::BTreeMap;

/// Header cells of the index table. The first one identifies the header row.
pub const COLUMNS: [&str; 5] = ["序号", "模型名称", "模型尺寸", "说明", "链接地址"];

/// Parse a markdown index into products keyed by index, images left empty.
///
/// Rows whose first cell is not an integer, and rows with fewer than the
/// index/name/size/description cells, are skipped. A duplicated index keeps
/// the last row.
pub fn parse_snapshot(markdown: &str) -> BTreeMap<u32, Product> {
    let mut products = BTreeMap::new();

    for (line_no, line) in markdown.lines().enumerate() {
        let line = line.trim_end();
        if !line.starts_with('|') {
            continue;
        }
        let cells: Vec<&str> = line.split('|').map(str::trim).collect();
        if cells.get(1) == Some(&COLUMNS[0]) {
            continue;
        }
        // cells[0] is the empty string before the leading pipe
        let Some(&[index, name, size, description]) = cells.get(1..5) else {
            tracing::debug!(line = line_no + 1, "snapshot row has too few cells");
            continue;
        };
        let Ok(index) = index.parse::<u32>() else {
            tracing::debug!(line = line_no + 1, cell = index, "snapshot row without numeric index");
            continue;
        };
        products.insert(index, Product::from_row(index, name, size, description));
    }

    products
}

/// Render the markdown index for `products` (already in catalog order).
pub fn render_snapshot(products: &[Product], config: &CatalogConfig) -> String {
    let mut lines = vec![
        format!("# {}", config.site.title),
        String::new(),
        format!("|{}|", COLUMNS.join("|")),
        format!("|{}|", ["----"; 5].join("|")),
    ];

    for product in products {
        let url = config.site.page_url(product.index);
        lines.push(format!(
            "|{}|{}|{}|{}|[{url}]({url})|",
            product.index,
            cell_text(&product.name),
            cell_text(&product.size),
            cell_text(&product.description),
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Make a value safe to place in a table cell and stable under re-parsing.
///
/// Parsing a rendered row gives back exactly `cell_text(value)`.
pub fn cell_text(value: &str) -> String {
    value
        .replace(['\r', '\n'], " ")
        .replace('|', "/")
        .trim()
        .to_string()
}
