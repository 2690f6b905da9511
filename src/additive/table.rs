use crate::models::RiskLevel;

/// Built-in additive reference data: normalized code, function class, overexposure risk.
pub const ADDITIVES: &[(&str, &str, RiskLevel)] = &[
    // Colors
    ("e100", "Food coloring", RiskLevel::Low),
    ("e101", "Food coloring", RiskLevel::Low),
    ("e102", "Food coloring", RiskLevel::High),
    ("e104", "Food coloring", RiskLevel::High),
    ("e110", "Food coloring", RiskLevel::High),
    ("e120", "Food coloring", RiskLevel::Medium),
    ("e129", "Food coloring", RiskLevel::High),
    ("e150a", "Food coloring", RiskLevel::Low),
    ("e150d", "Food coloring", RiskLevel::Medium),
    ("e160a", "Food coloring", RiskLevel::Low),
    ("e170", "Food coloring", RiskLevel::Low),
    ("e171", "Food coloring", RiskLevel::High),
    // Preservatives
    ("e200", "Preservative", RiskLevel::Medium),
    ("e202", "Preservative", RiskLevel::Low),
    ("e210", "Preservative", RiskLevel::High),
    ("e211", "Preservative", RiskLevel::High),
    ("e220", "Preservative", RiskLevel::High),
    ("e250", "Preservative", RiskLevel::High),
    ("e252", "Preservative", RiskLevel::High),
    ("e282", "Preservative", RiskLevel::Low),
    // Antioxidants and acidity regulators
    ("e300", "Antioxidant", RiskLevel::Low),
    ("e301", "Antioxidant", RiskLevel::Low),
    ("e306", "Antioxidant", RiskLevel::Low),
    ("e310", "Antioxidant", RiskLevel::Medium),
    ("e320", "Antioxidant", RiskLevel::High),
    ("e321", "Antioxidant", RiskLevel::High),
    ("e322", "Emulsifier", RiskLevel::Low),
    ("e330", "Acidity regulator", RiskLevel::Low),
    ("e331", "Acidity regulator", RiskLevel::Low),
    ("e338", "Acidity regulator", RiskLevel::Medium),
    // Thickeners, stabilisers, emulsifiers
    ("e400", "Thickener", RiskLevel::Low),
    ("e407", "Thickener", RiskLevel::Medium),
    ("e412", "Thickener", RiskLevel::Low),
    ("e415", "Thickener", RiskLevel::Low),
    ("e440", "Gelling agent", RiskLevel::Low),
    ("e450", "Stabiliser", RiskLevel::Medium),
    ("e466", "Thickener", RiskLevel::Medium),
    ("e471", "Emulsifier", RiskLevel::Medium),
    ("e500", "Raising agent", RiskLevel::Low),
    // Anticaking agents
    ("e551", "Anticaking agent", RiskLevel::High),
    // Flavor enhancers
    ("e620", "Flavor enhancer", RiskLevel::Medium),
    ("e621", "Flavor enhancer", RiskLevel::High),
    ("e627", "Flavor enhancer", RiskLevel::Medium),
    ("e631", "Flavor enhancer", RiskLevel::Medium),
    ("e635", "Flavor enhancer", RiskLevel::Medium),
    // Sweeteners
    ("e950", "Sweetener", RiskLevel::Medium),
    ("e951", "Sweetener", RiskLevel::Medium),
    ("e952", "Sweetener", RiskLevel::High),
    ("e954", "Sweetener", RiskLevel::Medium),
    ("e955", "Sweetener", RiskLevel::Medium),
];

/// Curated display names keyed by normalized code.
pub const NAMES: &[(&str, &str)] = &[
    ("e100", "Curcumin"),
    ("e101", "Riboflavin"),
    ("e102", "Tartrazine"),
    ("e104", "Quinoline yellow"),
    ("e110", "Sunset yellow FCF"),
    ("e120", "Carmine"),
    ("e129", "Allura red AC"),
    ("e150a", "Plain caramel"),
    ("e150d", "Sulphite ammonia caramel"),
    ("e160a", "Carotenes"),
    ("e170", "Calcium carbonate"),
    ("e171", "Titanium dioxide"),
    ("e200", "Sorbic acid"),
    ("e202", "Potassium sorbate"),
    ("e210", "Benzoic acid"),
    ("e211", "Sodium benzoate"),
    ("e220", "Sulphur dioxide"),
    ("e250", "Sodium nitrite"),
    ("e252", "Potassium nitrate"),
    ("e282", "Calcium propionate"),
    ("e300", "Ascorbic acid"),
    ("e301", "Sodium ascorbate"),
    ("e306", "Tocopherol-rich extract"),
    ("e310", "Propyl gallate"),
    ("e320", "Butylated hydroxyanisole"),
    ("e321", "Butylated hydroxytoluene"),
    ("e322", "Lecithins"),
    ("e330", "Citric acid"),
    ("e331", "Sodium citrates"),
    ("e338", "Phosphoric acid"),
    ("e400", "Alginic acid"),
    ("e407", "Carrageenan"),
    ("e412", "Guar gum"),
    ("e415", "Xanthan gum"),
    ("e440", "Pectins"),
    ("e450", "Diphosphates"),
    ("e466", "Carboxymethyl cellulose"),
    ("e471", "Mono- and diglycerides of fatty acids"),
    ("e500", "Sodium carbonates"),
    ("e551", "Silicon dioxide"),
    ("e620", "Glutamic acid"),
    ("e621", "Monosodium glutamate"),
    ("e627", "Disodium guanylate"),
    ("e631", "Disodium inosinate"),
    ("e635", "Disodium 5'-ribonucleotides"),
    ("e950", "Acesulfame K"),
    ("e951", "Aspartame"),
    ("e952", "Cyclamates"),
    ("e954", "Saccharin"),
    ("e955", "Sucralose"),
];

/// Extended details for the few additives that have them.
pub struct Details {
    pub name: &'static str,
    pub purpose: &'static str,
    pub description: &'static str,
    pub health_risks: &'static [&'static str],
}

pub fn curated_details(code: &str) -> Option<Details> {
    match code {
        "e551" => Some(Details {
            name: "Silicon dioxide",
            purpose: "Ensures the fluidity of a powdered product by limiting the agglutination of the particles",
            description: "This additive may contain nanoparticles, small molecules capable of crossing the \
                intestinal barrier, accumulating in organs, and disrupting the gut microbiota, potentially \
                leading to inflammatory bowel diseases. By disturbing the immune response, it could, in \
                particular, promote the onset of celiac disease in certain individuals.",
            health_risks: &["Adverse effects on the liver", "Adverse effects on the kidneys"],
        }),
        "e621" => Some(Details {
            name: "Monosodium glutamate",
            purpose: "Enhances the taste and aroma of food",
            description: "Monosodium glutamate (MSG) is a flavor enhancer commonly added to Chinese food, \
                canned vegetables, soups, and processed meats. Some people report adverse reactions to MSG, \
                including headache, flushing, sweating, facial pressure, numbness, heart palpitations, \
                chest pain, nausea, and weakness.",
            health_risks: &["Headaches", "Allergic reactions"],
        }),
        "e300" => Some(Details {
            name: "Ascorbic acid (Vitamin C)",
            purpose: "Prevents food from oxidizing and changing color",
            description: "Ascorbic acid, also known as Vitamin C, is a natural antioxidant that helps prevent \
                food from browning and protects against oxidation. It is considered safe and has health \
                benefits as an essential vitamin.",
            health_risks: &[],
        }),
        _ => None,
    }
}
