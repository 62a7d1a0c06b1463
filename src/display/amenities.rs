/// Icon identifiers the views map onto their glyph set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmenityIcon {
    Wifi,
    Car,
    Shield,
    Zap,
    Droplets,
    TreePine,
    Mountain,
    Utensils,
    Home,
    Check,
}

// Keyword rules, evaluated top to bottom against the lowercased label.
// First hit wins, so "Swimming Pool with Mountain View" stays a water
// amenity. `Check` is the fallback for anything unmatched.
const ICON_RULES: &[(&[&str], AmenityIcon)] = &[
    (&["wifi", "internet"], AmenityIcon::Wifi),
    (&["parking", "garage"], AmenityIcon::Car),
    (&["security", "guard"], AmenityIcon::Shield),
    (&["power", "electricity", "backup"], AmenityIcon::Zap),
    (&["water", "swimming", "pool"], AmenityIcon::Droplets),
    (&["garden", "organic", "green"], AmenityIcon::TreePine),
    (&["view", "mountain", "lake"], AmenityIcon::Mountain),
    (&["kitchen", "dining"], AmenityIcon::Utensils),
    (&["gym", "fitness", "club"], AmenityIcon::Home),
];

pub fn icon_for(amenity: &str) -> AmenityIcon {
    let label = amenity.to_lowercase();
    for (keywords, icon) in ICON_RULES {
        if keywords.iter().any(|keyword| label.contains(keyword)) {
            return *icon;
        }
    }
    AmenityIcon::Check
}
