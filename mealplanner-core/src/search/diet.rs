//! Mapping from the frontend's diet selector to Edamam filter parameters.

/// A diet choice offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietFilter {
    HighProtein,
    LowCalorie,
    Vegetarian,
    Vegan,
}

/// Which Edamam query parameter a filter is sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterParam {
    Diet,
    Health,
}

impl FilterParam {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterParam::Diet => "diet",
            FilterParam::Health => "health",
        }
    }
}

/// Values accepted from the search form's diet selector.
const DIET_NAMES: &[(&str, DietFilter)] = &[
    ("high-protein", DietFilter::HighProtein),
    ("low-calorie", DietFilter::LowCalorie),
    ("vegetarian", DietFilter::Vegetarian),
    ("vegan", DietFilter::Vegan),
];

impl DietFilter {
    /// Parse the raw `diet` query value. Unrecognised or empty input yields `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        DIET_NAMES
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, filter)| *filter)
    }

    /// The `(param, value)` pair to add to the upstream request.
    pub fn upstream_param(self) -> (FilterParam, &'static str) {
        match self {
            DietFilter::HighProtein => (FilterParam::Diet, "high-protein"),
            // Edamam has no low-calorie diet label; low-fat is the closest.
            DietFilter::LowCalorie => (FilterParam::Diet, "low-fat"),
            DietFilter::Vegetarian => (FilterParam::Health, "vegetarian"),
            DietFilter::Vegan => (FilterParam::Health, "vegan"),
        }
    }
}

/// Upstream parameter for an optional raw diet value. Total over all inputs.
pub fn diet_params(diet: Option<&str>) -> Option<(&'static str, &'static str)> {
    diet.and_then(DietFilter::from_param).map(|filter| {
        let (param, value) = filter.upstream_param();
        (param.as_str(), value)
    })
}
