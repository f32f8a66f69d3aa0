use serde::{Deserialize, Serialize};

/// Case count categories reported by the JHU CSSE dataset.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Category {
    Confirmed,
    Deaths,
    Recovered,
}

/// A D3 sequential color scale for one category's choropleth.
///
/// `interpolator` names a `d3.interpolate*` scheme; `reversed` flips the
/// domain so high values map to the dark end of the scheme.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct ScaleDescriptor {
    pub interpolator: &'static str,
    pub reversed: bool,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Confirmed, Category::Deaths, Category::Recovered];

    /// Display label, also used as the series key in chart payloads.
    pub fn label(self) -> &'static str {
        match self {
            Category::Confirmed => "Confirmed",
            Category::Deaths => "Deaths",
            Category::Recovered => "Recovered",
        }
    }

    /// Inverse of [`label`](Self::label), for UI selector values.
    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "Confirmed" => Some(Category::Confirmed),
            "Deaths" => Some(Category::Deaths),
            "Recovered" => Some(Category::Recovered),
            _ => None,
        }
    }

    /// Fixed category-to-scale mapping for the choropleth map.
    ///
    /// Confirmed uses a warm sequential scheme, Deaths a dark one
    /// (reversed so high counts run dark), Recovered a green one.
    pub fn color_scale(self) -> ScaleDescriptor {
        match self {
            Category::Confirmed => ScaleDescriptor {
                interpolator: "YlOrRd",
                reversed: false,
            },
            Category::Deaths => ScaleDescriptor {
                interpolator: "Inferno",
                reversed: true,
            },
            Category::Recovered => ScaleDescriptor {
                interpolator: "Greens",
                reversed: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn test_label_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("Active"), None);
    }

    #[test]
    fn test_color_scales_are_distinct() {
        let confirmed = Category::Confirmed.color_scale();
        let deaths = Category::Deaths.color_scale();
        let recovered = Category::Recovered.color_scale();
        assert_ne!(confirmed.interpolator, deaths.interpolator);
        assert_ne!(deaths.interpolator, recovered.interpolator);
        assert!(deaths.reversed);
        assert!(!confirmed.reversed);
    }
}
