//! CSS shorthand families.
//!
//! Used by the cascade to expand shorthands into the longhands they set,
//! and by the variant audit to decide whether two properties can affect the
//! same computed value.

use phf::phf_map;

use crate::parser::values::split_top_level_whitespace;

/// Longhands covered by each shorthand. Coverage is transitive: `border`
/// covers `border-bottom`, which covers `border-bottom-color`.
static SHORTHANDS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "margin" => &["margin-top", "margin-right", "margin-bottom", "margin-left"],
    "padding" => &["padding-top", "padding-right", "padding-bottom", "padding-left"],
    "inset" => &["top", "right", "bottom", "left"],
    "border" => &[
        "border-top", "border-right", "border-bottom", "border-left",
        "border-width", "border-style", "border-color",
    ],
    "border-top" => &["border-top-width", "border-top-style", "border-top-color"],
    "border-right" => &["border-right-width", "border-right-style", "border-right-color"],
    "border-bottom" => &["border-bottom-width", "border-bottom-style", "border-bottom-color"],
    "border-left" => &["border-left-width", "border-left-style", "border-left-color"],
    "border-width" => &[
        "border-top-width", "border-right-width", "border-bottom-width", "border-left-width",
    ],
    "border-style" => &[
        "border-top-style", "border-right-style", "border-bottom-style", "border-left-style",
    ],
    "border-color" => &[
        "border-top-color", "border-right-color", "border-bottom-color", "border-left-color",
    ],
    "border-radius" => &[
        "border-top-left-radius", "border-top-right-radius",
        "border-bottom-right-radius", "border-bottom-left-radius",
    ],
    "background" => &[
        "background-color", "background-image", "background-position",
        "background-repeat", "background-size",
    ],
    "grid-template" => &["grid-template-columns", "grid-template-rows", "grid-template-areas"],
    "gap" => &["row-gap", "column-gap"],
};

/// Shorthands whose 1 to 4 components follow the top, right, bottom, left
/// pattern.
const BOX_SHORTHANDS: [&str; 7] = [
    "margin",
    "padding",
    "inset",
    "border-width",
    "border-style",
    "border-color",
    "border-radius",
];

fn covers(shorthand: &str, property: &str) -> bool {
    SHORTHANDS.get(shorthand).is_some_and(|longhands| {
        longhands
            .iter()
            .any(|l| *l == property || covers(l, property))
    })
}

/// True when setting `a` can change the computed value of `b` or vice versa.
pub fn properties_overlap(a: &str, b: &str) -> bool {
    a == b || covers(a, b) || covers(b, a)
}

/// Every longhand `property` covers, transitively.
pub fn covered_longhands(property: &str) -> Vec<&'static str> {
    let mut out = Vec::new();
    if let Some(longhands) = SHORTHANDS.get(property) {
        for longhand in longhands.iter() {
            out.push(*longhand);
            out.extend(covered_longhands(longhand));
        }
    }
    out
}

/// The longhand values a shorthand declaration sets, or `None` when the
/// value cannot be split statically.
///
/// Values containing `var(...)` are not split: a single token may stand for
/// several components, so the longhands stay pending until paint.
///
/// ```
/// use stylecomp::parser::shorthand::expand;
///
/// assert_eq!(
///     expand("margin", "0 12px 8px").unwrap(),
///     vec![
///         ("margin-top", "0".to_string()),
///         ("margin-right", "12px".to_string()),
///         ("margin-bottom", "8px".to_string()),
///         ("margin-left", "12px".to_string()),
///     ]
/// );
/// assert!(expand("margin", "0 0 var(--post-gap)").is_none());
/// ```
pub fn expand(property: &str, value: &str) -> Option<Vec<(&'static str, String)>> {
    if value.contains("var(") {
        return None;
    }
    let longhands = SHORTHANDS.get(property)?;

    if BOX_SHORTHANDS.contains(&property) {
        if value.contains('/') {
            return None;
        }
        let parts = split_top_level_whitespace(value);
        let [top, right, bottom, left] = match parts.as_slice() {
            [a] => [a, a, a, a],
            [a, b] => [a, b, a, b],
            [a, b, c] => [a, b, c, b],
            [a, b, c, d] => [a, b, c, d],
            _ => return None,
        };
        let values = [top, right, bottom, left];
        return Some(
            longhands
                .iter()
                .zip(values)
                .map(|(l, v)| (*l, v.to_string()))
                .collect(),
        );
    }

    match property {
        // Each side takes the whole `<width> <style> <color>` value.
        "border" => Some(
            longhands[..4]
                .iter()
                .map(|side| (*side, value.trim().to_string()))
                .collect(),
        ),
        "gap" => match split_top_level_whitespace(value).as_slice() {
            [both] => Some(vec![
                ("row-gap", both.to_string()),
                ("column-gap", both.to_string()),
            ]),
            [row, column] => Some(vec![
                ("row-gap", row.to_string()),
                ("column-gap", column.to_string()),
            ]),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_families_overlap() {
        assert!(properties_overlap("border", "border-bottom"));
        assert!(properties_overlap("border-bottom-color", "border"));
        assert!(properties_overlap("border-radius", "border-top-left-radius"));
        assert!(!properties_overlap("border", "border-top-left-radius"));
        assert!(!properties_overlap("margin", "padding-top"));
    }

    #[test]
    fn border_covers_side_components() {
        let covered = covered_longhands("border");
        assert!(covered.contains(&"border-top"));
        assert!(covered.contains(&"border-top-color"));
        assert!(!covered.contains(&"border-top-left-radius"));
    }

    #[test]
    fn expands_sides_and_radii() {
        let sides = expand("border", "none").unwrap();
        assert_eq!(sides.len(), 4);
        assert!(sides.iter().all(|(_, v)| v == "none"));

        let radii = expand("border-radius", "4px 0").unwrap();
        assert_eq!(radii[2], ("border-bottom-right-radius", "4px".to_string()));
        assert_eq!(radii[3], ("border-bottom-left-radius", "0".to_string()));

        assert!(expand("border-radius", "4px / 2px").is_none());
        assert!(expand("background", "none").is_none());
        assert!(expand("margin", "1px 2px 3px 4px 5px").is_none());
    }
}
