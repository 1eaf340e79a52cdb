//! Per-source price/quality profiles (§4.A "Source abstraction").
//!
//! Three synthetic marketplace sources, each with a different markup range,
//! MOQ menu, lead-time spread, and confidence/rating band, mirroring the
//! three mock sources the original scraper simulated.

pub struct SourceProfile {
    pub price_factor_range: (f64, f64),
    pub moq_options: &'static [u32],
    pub lead_time_range: (u32, u32),
    pub confidence_range: (f64, f64),
    pub rating_range: (f64, f64),
}

pub const MOCK_ALIBABA: &str = "mock_alibaba";
pub const MOCK_GLOBALSOURCES: &str = "mock_globalsources";
pub const MOCK_MADE_IN_CHINA: &str = "mock_made_in_china";

/// All enabled sources, in the order used when a caller does not restrict
/// `sources` (§4.A: "defaults to the full enabled set").
pub fn default_sources() -> Vec<String> {
    vec![
        MOCK_ALIBABA.to_string(),
        MOCK_GLOBALSOURCES.to_string(),
        MOCK_MADE_IN_CHINA.to_string(),
    ]
}

/// Falls back to [`MOCK_ALIBABA`]'s profile for an unrecognised source name,
/// same as the reference scraper.
pub fn profile_for(source: &str) -> &'static SourceProfile {
    match source {
        MOCK_GLOBALSOURCES => &GLOBALSOURCES_PROFILE,
        MOCK_MADE_IN_CHINA => &MADE_IN_CHINA_PROFILE,
        _ => &ALIBABA_PROFILE,
    }
}

static ALIBABA_PROFILE: SourceProfile = SourceProfile {
    price_factor_range: (0.85, 1.05),
    moq_options: &[100, 250, 500, 1000],
    lead_time_range: (14, 45),
    confidence_range: (0.75, 0.95),
    rating_range: (3.5, 5.0),
};

static GLOBALSOURCES_PROFILE: SourceProfile = SourceProfile {
    price_factor_range: (0.90, 1.10),
    moq_options: &[250, 500, 1000, 2000],
    lead_time_range: (21, 60),
    confidence_range: (0.80, 0.98),
    rating_range: (3.8, 5.0),
};

static MADE_IN_CHINA_PROFILE: SourceProfile = SourceProfile {
    price_factor_range: (0.80, 1.00),
    moq_options: &[500, 1000, 2000, 5000],
    lead_time_range: (30, 60),
    confidence_range: (0.65, 0.90),
    rating_range: (3.0, 4.8),
};

pub const SUPPLIER_NAMES: &[&str] = &[
    "Shenzhen TechParts Co.",
    "GlobalEdge Manufacturing",
    "Delta Supply Group",
    "Apex Industrial Ltd",
    "Meridian Components",
    "Pacific Source Inc.",
    "Titan Trade Co.",
    "Sunrise Exports",
    "EastWest Logistics",
    "PrimeGoods Mfg",
    "Horizon Enterprises",
    "BlueStar Supplies",
    "NovaTrade Asia",
    "AlphaMakers",
    "ZenithProcure Ltd",
];
