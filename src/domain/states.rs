/// Expands a two-letter US state/territory or Canadian province abbreviation
/// to its full name. Unknown abbreviations are returned unchanged.
pub fn state_name(abbreviation: &str) -> &str {
    match abbreviation {
        "AB" => "Alberta",
        "AK" => "Alaska",
        "AL" => "Alabama",
        "AR" => "Arkansas",
        "AS" => "American Samoa",
        "AZ" => "Arizona",
        "BC" => "British Columbia",
        "CA" => "California",
        "CO" => "Colorado",
        "CT" => "Connecticut",
        "DC" => "District of Columbia",
        "DE" => "Delaware",
        "FL" => "Florida",
        "GA" => "Georgia",
        "GU" => "Guam",
        "HI" => "Hawaii",
        "IA" => "Iowa",
        "ID" => "Idaho",
        "IL" => "Illinois",
        "IN" => "Indiana",
        "KS" => "Kansas",
        "KY" => "Kentucky",
        "LA" => "Louisiana",
        "MA" => "Massachusetts",
        "MB" => "Manitoba",
        "MD" => "Maryland",
        "ME" => "Maine",
        "MI" => "Michigan",
        "MN" => "Minnesota",
        "MO" => "Missouri",
        "MP" => "Northern Mariana Islands",
        "MS" => "Mississippi",
        "MT" => "Montana",
        "NB" => "New Brunswick",
        "NC" => "North Carolina",
        "ND" => "North Dakota",
        "NE" => "Nebraska",
        "NH" => "New Hampshire",
        "NJ" => "New Jersey",
        "NL" => "Newfoundland and Labrador",
        "NM" => "New Mexico",
        "NS" => "Nova Scotia",
        "NV" => "Nevada",
        "NY" => "New York",
        "OH" => "Ohio",
        "OK" => "Oklahoma",
        "ON" => "Ontario",
        "OR" => "Oregon",
        "PA" => "Pennsylvania",
        "PE" => "Prince Edward Island",
        "PR" => "Puerto Rico",
        "QC" => "Quebec",
        "RI" => "Rhode Island",
        "SC" => "South Carolina",
        "SD" => "South Dakota",
        "SK" => "Saskatchewan",
        "TN" => "Tennessee",
        "TX" => "Texas",
        "UM" => "U.S. Minor Outlying Islands",
        "UT" => "Utah",
        "VA" => "Virginia",
        "VI" => "U.S. Virgin Islands",
        "VT" => "Vermont",
        "WA" => "Washington",
        "WI" => "Wisconsin",
        "WV" => "West Virginia",
        "WY" => "Wyoming",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_abbreviations() {
        assert_eq!(state_name("MD"), "Maryland");
        assert_eq!(state_name("DC"), "District of Columbia");
        assert_eq!(state_name("ON"), "Ontario");
        assert_eq!(state_name("VI"), "U.S. Virgin Islands");
    }

    #[test]
    fn test_unknown_abbreviation_passes_through() {
        assert_eq!(state_name("ZZ"), "ZZ");
        assert_eq!(state_name(""), "");
    }
}
