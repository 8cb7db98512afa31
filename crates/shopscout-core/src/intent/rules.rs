//! Pattern-based extraction rules
//!
//! Each intent field has an ordered list of `(regex, capture group,
//! normalizer)` rules; the first rule whose match survives normalization
//! wins for that field. The tables are plain data evaluated by a single
//! pure function, so extraction is deterministic and never fails on
//! malformed input; an unmatched field is simply left empty.

use super::StructuredIntent;
use lazy_static::lazy_static;
use regex::Regex;

/// Normalizers may reject a syntactic match (return `None`), in which case
/// evaluation moves on to the next rule.
type Normalizer = fn(&str) -> Option<String>;

struct Rule {
    re: Regex,
    group: usize,
    normalize: Normalizer,
}

impl Rule {
    fn new(pattern: &str, group: usize, normalize: Normalizer) -> Self {
        Self {
            re: Regex::new(pattern).expect("invalid extraction rule pattern"),
            group,
            normalize,
        }
    }
}

/// First match wins; a rule whose normalizer rejects the match is skipped.
fn eval(rules: &[Rule], text: &str) -> Option<String> {
    for rule in rules {
        for caps in rule.re.captures_iter(text) {
            if let Some(m) = caps.get(rule.group) {
                if let Some(value) = (rule.normalize)(m.as_str()) {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn eval_number(rules: &[Rule], text: &str) -> Option<f64> {
    eval(rules, text).and_then(|v| v.parse().ok())
}

fn eval_flag(rules: &[Rule], text: &str) -> Option<bool> {
    eval(rules, text).map(|_| true)
}

lazy_static! {
    static ref MIN_PRICE_RULES: Vec<Rule> = vec![
        Rule::new(
            r"(?i)\bbetween\s*[$₹]?\s*([\d][\d,]*)\s*(?:and|to|-)\s*[$₹]?\s*[\d][\d,]*",
            1,
            norm_number,
        ),
        Rule::new(
            r"(?i)\b(?:over|above|more than|at least|starting (?:at|from)|from)\s*[$₹]\s*([\d][\d,]*)",
            1,
            norm_number,
        ),
        Rule::new(
            r"(?i)\b(?:over|above|more than|at least)\s*([\d][\d,]*)\s*(?:dollars|bucks|rupees)?\b",
            1,
            norm_number,
        ),
    ];
    static ref MAX_PRICE_RULES: Vec<Rule> = vec![
        Rule::new(
            r"(?i)\bbetween\s*[$₹]?\s*[\d][\d,]*\s*(?:and|to|-)\s*[$₹]?\s*([\d][\d,]*)",
            1,
            norm_number,
        ),
        Rule::new(
            r"(?i)\b(?:under|below|less than|cheaper than|within|up to|at most|max(?:imum)?(?:\s+of)?)\s*[$₹]?\s*([\d][\d,]*)",
            1,
            norm_number,
        ),
        Rule::new(r"(?i)\bbudget\s*(?:of|is)?\s*[$₹]?\s*([\d][\d,]*)", 1, norm_number),
    ];
    static ref MIN_RATING_RULES: Vec<Rule> = vec![
        Rule::new(
            r"(?i)\b([0-5](?:\.\d)?)\s*(?:\+\s*)?stars?\s*(?:and up|or (?:more|higher|better|above))",
            1,
            norm_number,
        ),
        Rule::new(
            r"(?i)\brat(?:ed|ing)\s*(?:above|over|at least)?\s*([0-5](?:\.\d)?)\b",
            1,
            norm_number,
        ),
        Rule::new(r"(?i)\b([0-5](?:\.\d)?)\s*\+\s*rating\b", 1, norm_number),
    ];
    static ref STORAGE_RULES: Vec<Rule> = vec![
        Rule::new(
            r"(?i)\b(\d+\s*(?:gb|tb))\s+(?:of\s+)?(?:internal\s+)?storage\b",
            1,
            norm_capacity,
        ),
        Rule::new(r"(?i)\b([12]\s*tb)\b", 1, norm_capacity),
        // Bare gigabyte counts are only treated as storage for the common
        // storage tiers; smaller values are RAM territory.
        Rule::new(r"(?i)\b((?:32|64|128|256|512)\s*gb)\b", 1, norm_capacity),
    ];
    static ref RAM_RULES: Vec<Rule> = vec![
        Rule::new(r"(?i)\b(\d+\s*gb)\s+(?:of\s+)?ram\b", 1, norm_capacity),
        Rule::new(r"(?i)\bram\s*(?:of\s*)?(\d+\s*gb)\b", 1, norm_capacity),
    ];
    static ref COLOR_RULES: Vec<Rule> = vec![Rule::new(
        r"(?i)\b(black|white|blue|red|green|gold|silver|graphite|gray|grey|purple|pink|midnight|starlight|titanium)\b",
        1,
        norm_title,
    )];
    static ref BRAND_RULES: Vec<Rule> = vec![
        Rule::new(
            r"(?i)\b(apple|samsung|google|oneplus|xiaomi|motorola|nokia|sony|oppo|vivo|realme)\b",
            1,
            norm_title,
        ),
        // Model names imply the brand when it is not spelled out
        Rule::new(r"(?i)\b(iphone)\b", 1, |_| Some("Apple".to_string())),
        Rule::new(r"(?i)\b(galaxy)\b", 1, |_| Some("Samsung".to_string())),
        Rule::new(r"(?i)\b(pixel)\b", 1, |_| Some("Google".to_string())),
    ];
    static ref MODEL_RULES: Vec<Rule> = vec![
        Rule::new(
            r"(?i)\b(iphone\s*\d+\s*(?:pro\s*max|pro|plus|mini)?)\b",
            1,
            norm_model,
        ),
        Rule::new(
            r"(?i)\b(galaxy\s*[szam]\d+\s*(?:ultra|plus|fe)?)\b",
            1,
            norm_model,
        ),
        Rule::new(r"(?i)\b(pixel\s*\d+\s*(?:pro\s*xl|pro|a)?)\b", 1, norm_model),
    ];
    static ref PROCESSOR_RULES: Vec<Rule> = vec![
        Rule::new(
            r"(?i)\b(snapdragon\s*(?:\d+\s*)?(?:gen\s*\d)?)\b",
            1,
            norm_model,
        ),
        Rule::new(r"(?i)\b(dimensity\s*\d+)\b", 1, norm_model),
        Rule::new(r"(?i)\b(exynos\s*\d+)\b", 1, norm_model),
        Rule::new(r"(?i)\b(a\d{2}\s*bionic)\b", 1, norm_model),
        Rule::new(r"(?i)\b(tensor\s*(?:g\d)?)\b", 1, norm_model),
    ];
    static ref CATEGORY_RULES: Vec<Rule> = vec![
        Rule::new(r"(?i)\b(?:smartphones?|smart\s*phones?|phones?|mobiles?)\b", 0, |_| {
            Some("Smartphones".to_string())
        }),
        Rule::new(r"(?i)\b(?:laptops?|notebooks?)\b", 0, |_| Some("Laptops".to_string())),
        Rule::new(r"(?i)\b(?:tablets?|ipads?)\b", 0, |_| Some("Tablets".to_string())),
        Rule::new(r"(?i)\b(?:stores?|shops?|outlets?|showrooms?)\b", 0, |_| {
            Some("Stores".to_string())
        }),
        Rule::new(r"(?i)\b(?:accessor(?:y|ies)|cases?|chargers?)\b", 0, |_| {
            Some("Accessories".to_string())
        }),
    ];
    static ref CITY_RULES: Vec<Rule> = vec![Rule::new(
        r"(?i)\b(?:in|near|around)\s+((?:[A-Za-z]+\s+){0,2}[A-Za-z]+)",
        1,
        norm_location,
    )];
    static ref STATE_RULES: Vec<Rule> = vec![Rule::new(
        r"(?i)\b(california|texas|new york|florida|washington|illinois|georgia|ohio|arizona|colorado|oregon|nevada|karnataka|maharashtra|telangana|gujarat|tamil nadu|delhi)\b",
        1,
        norm_title,
    )];
    static ref POSTAL_CODE_RULES: Vec<Rule> = vec![Rule::new(
        r"(?i)\b(?:pin\s*code|pincode|zip\s*code|zip|postal\s*code)\s*:?\s*(\d{5,6})\b",
        1,
        norm_identity,
    )];
    static ref WATER_RESISTANT_RULES: Vec<Rule> = vec![Rule::new(
        r"(?i)\bwater[\s-]?(?:resistant|resistance|proof)\b|\bip6[78]\b",
        0,
        norm_identity,
    )];
    static ref WIRELESS_CHARGING_RULES: Vec<Rule> = vec![Rule::new(
        r"(?i)\bwireless[\s-]?charg(?:ing|er|e)\b",
        0,
        norm_identity,
    )];
    static ref FAST_CHARGING_RULES: Vec<Rule> = vec![Rule::new(
        r"(?i)\bfast[\s-]?charg(?:ing|er|e)\b|\bquick[\s-]?charge\b",
        0,
        norm_identity,
    )];
    static ref FIVE_G_RULES: Vec<Rule> = vec![Rule::new(r"(?i)\b5\s*g\b", 0, norm_identity)];
}

/// Words that syntactically sit where a city name would but never are one.
const LOCATION_BLOCKLIST: &[&str] = &[
    "stock", "store", "stores", "shop", "shops", "black", "white", "blue", "red", "green", "gold",
    "silver", "gray", "grey", "budget", "total", "cash", "general", "particular", "fact", "case",
    "order", "time", "between", "under", "good", "great", "best", "me", "here", "nearby", "town",
    "my",
];

fn norm_identity(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn norm_number(s: &str) -> Option<String> {
    let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// "128 gb" -> "128GB"
fn norm_capacity(s: &str) -> Option<String> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    Some(compact.to_uppercase())
}

fn norm_title(s: &str) -> Option<String> {
    Some(title_case(s.trim()))
}

/// Collapse whitespace and title-case, keeping digits as-is ("iphone 15 pro"
/// -> "iPhone 15 Pro" is not attempted; plain title case is enough for
/// phrase-prefix matching).
fn norm_model(s: &str) -> Option<String> {
    let collapsed = collapse_whitespace(s.trim());
    if collapsed.is_empty() {
        None
    } else {
        Some(title_case(&collapsed))
    }
}

/// Location normalization: collapse whitespace, strip a leading "the" and a
/// trailing "city", reject blocklisted words. Shared with the entity-based
/// strategy so both normalize city values identically.
pub(crate) fn norm_location(s: &str) -> Option<String> {
    let mut value = collapse_whitespace(s.trim()).to_lowercase();
    if let Some(stripped) = value.strip_prefix("the ") {
        value = stripped.to_string();
    }
    if let Some(stripped) = value.strip_suffix(" city") {
        value = stripped.to_string();
    }
    // Non-location words frequently ride along in the capture
    // ("in Austin with 5g"); cut at the first one.
    let mut words: Vec<&str> = Vec::new();
    for word in value.split(' ') {
        if LOCATION_BLOCKLIST.contains(&word) || TRAILING_NOISE.contains(&word) {
            break;
        }
        words.push(word);
    }
    if words.is_empty() {
        return None;
    }
    Some(title_case(&words.join(" ")))
}

/// Connectives that trail a city capture when the query continues.
const TRAILING_NOISE: &[&str] = &["with", "and", "that", "for", "under", "over", "near", "having"];

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pattern-based extraction. Deterministic for identical input; never
/// errors, unmatched fields stay empty.
pub fn extract(text: &str) -> StructuredIntent {
    StructuredIntent {
        min_price: eval_number(&MIN_PRICE_RULES, text),
        max_price: eval_number(&MAX_PRICE_RULES, text),
        min_rating: eval_number(&MIN_RATING_RULES, text),
        color: eval(&COLOR_RULES, text),
        storage: eval(&STORAGE_RULES, text),
        brand: eval(&BRAND_RULES, text),
        model: eval(&MODEL_RULES, text),
        processor: eval(&PROCESSOR_RULES, text),
        ram: eval(&RAM_RULES, text),
        category: eval(&CATEGORY_RULES, text),
        city: eval(&CITY_RULES, text),
        state: eval(&STATE_RULES, text),
        postal_code: eval(&POSTAL_CODE_RULES, text),
        water_resistant: eval_flag(&WATER_RESISTANT_RULES, text),
        wireless_charging: eval_flag(&WIRELESS_CHARGING_RULES, text),
        fast_charging: eval_flag(&FAST_CHARGING_RULES, text),
        five_g: eval_flag(&FIVE_G_RULES, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_price_under() {
        let intent = extract("phones under $500");
        assert_eq!(intent.max_price, Some(500.0));
        assert_eq!(intent.min_price, None);
    }

    #[test]
    fn test_price_between() {
        let intent = extract("smartphones between $300 and $700");
        assert_eq!(intent.min_price, Some(300.0));
        assert_eq!(intent.max_price, Some(700.0));
    }

    #[test]
    fn test_price_with_commas() {
        let intent = extract("laptops under $1,200");
        assert_eq!(intent.max_price, Some(1200.0));
    }

    #[test]
    fn test_min_rating() {
        let intent = extract("phones rated 4.5 or above");
        assert_eq!(intent.min_rating, Some(4.5));
    }

    #[test]
    fn test_storage_vs_ram() {
        let intent = extract("phone with 128GB storage and 8GB RAM");
        assert_eq!(intent.storage.as_deref(), Some("128GB"));
        assert_eq!(intent.ram.as_deref(), Some("8GB"));
    }

    #[test]
    fn test_bare_storage_tier() {
        let intent = extract("256gb iphone");
        assert_eq!(intent.storage.as_deref(), Some("256GB"));
    }

    #[test]
    fn test_small_gb_is_not_storage() {
        let intent = extract("phone with 8GB RAM");
        assert_eq!(intent.storage, None);
        assert_eq!(intent.ram.as_deref(), Some("8GB"));
    }

    #[test]
    fn test_brand_from_model_name() {
        let intent = extract("latest iphone 15 pro");
        assert_eq!(intent.brand.as_deref(), Some("Apple"));
        assert_eq!(intent.model.as_deref(), Some("Iphone 15 Pro"));
    }

    #[test]
    fn test_city_normalization_strips_trailing_city() {
        let intent = extract("stores in New York city");
        assert_eq!(intent.city.as_deref(), Some("New York"));
    }

    #[test]
    fn test_city_normalization_strips_leading_the() {
        let intent = extract("stores in the Bronx");
        assert_eq!(intent.city.as_deref(), Some("Bronx"));
    }

    #[test]
    fn test_city_whitespace_collapsed() {
        let intent = extract("stores in  San   Francisco");
        assert_eq!(intent.city.as_deref(), Some("San Francisco"));
    }

    #[test]
    fn test_city_blocklist_rejects_in_stock() {
        let intent = extract("phones in stock");
        assert_eq!(intent.city, None);
    }

    #[test]
    fn test_city_trailing_connective_trimmed() {
        let intent = extract("stores in Austin with fast charging phones");
        assert_eq!(intent.city.as_deref(), Some("Austin"));
    }

    #[test]
    fn test_postal_code_needs_context() {
        let intent = extract("stores near zip code 94103");
        assert_eq!(intent.postal_code.as_deref(), Some("94103"));

        // A bare number is a price, not a postal code
        let intent = extract("phones under 94103");
        assert_eq!(intent.postal_code, None);
    }

    #[test]
    fn test_feature_flags() {
        let intent = extract("waterproof 5G phone with wireless charging and fast charging");
        assert_eq!(intent.water_resistant, Some(true));
        assert_eq!(intent.five_g, Some(true));
        assert_eq!(intent.wireless_charging, Some(true));
        assert_eq!(intent.fast_charging, Some(true));
    }

    #[test]
    fn test_absent_flag_is_none_not_false() {
        let intent = extract("cheap phones");
        assert_eq!(intent.water_resistant, None);
        assert_eq!(intent.five_g, None);
    }

    #[test]
    fn test_category() {
        assert_eq!(extract("smartphones").category.as_deref(), Some("Smartphones"));
        assert_eq!(extract("find stores near me").category.as_deref(), Some("Stores"));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let intent = extract("%%% ??? !!!");
        assert!(intent.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let a = extract("samsung galaxy s24 under $900 in Seattle");
        let b = extract("samsung galaxy s24 under $900 in Seattle");
        assert_eq!(a, b);
    }
}
