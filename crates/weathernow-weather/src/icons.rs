//! Condition code → icon lookup.
//! See: https://www.weatherapi.com/docs/weather_conditions.json

/// Icon shown for codes not in the table
pub const UNKNOWN_ICON: &str = "fas fa-question";

/// Map a provider condition code and day/night flag to an icon identifier.
pub fn icon_for(code: u32, is_day: bool) -> &'static str {
    match code {
        // Clear
        1000 if is_day => "fas fa-sun",
        1000 => "fas fa-moon",
        // Partly cloudy
        1003 if is_day => "fas fa-cloud-sun",
        1003 => "fas fa-cloud-moon",
        // Cloudy, overcast
        1006 | 1009 => "fas fa-cloud",
        // Mist, fog, freezing fog
        1030 | 1135 | 1147 => "fas fa-smog",
        // Patchy rain possible, patchy light rain, light rain shower
        1063 | 1180 | 1240 => "fas fa-cloud-sun-rain",
        // Patchy snow possible and all steady snow
        1066 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 => "fas fa-snowflake",
        // Sleet and ice pellets
        1069 | 1204 | 1207 | 1237 | 1249 | 1252 | 1261 | 1264 => "fas fa-cloud-meatball",
        // Patchy freezing drizzle, rain, freezing rain
        1072 | 1183 | 1186 | 1189 | 1198 | 1201 => "fas fa-cloud-rain",
        // Thunder
        1087 | 1273 | 1276 | 1279 | 1282 => "fas fa-bolt",
        // Blowing snow, blizzard
        1114 | 1117 => "fas fa-wind",
        // Drizzle
        1150 | 1153 | 1168 | 1171 => "fas fa-cloud-drizzle",
        // Heavy rain
        1192 | 1195 | 1243 | 1246 => "fas fa-cloud-showers-heavy",
        _ => UNKNOWN_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_CODES: [u32; 48] = [
        1000, 1003, 1006, 1009, 1030, 1063, 1066, 1069, 1072, 1087, 1114, 1117, 1135, 1147,
        1150, 1153, 1168, 1171, 1180, 1183, 1186, 1189, 1192, 1195, 1198, 1201, 1204, 1207,
        1210, 1213, 1216, 1219, 1222, 1225, 1237, 1240, 1243, 1246, 1249, 1252, 1255, 1258,
        1261, 1264, 1273, 1276, 1279, 1282,
    ];

    #[test]
    fn test_clear_day_and_night() {
        assert_eq!(icon_for(1000, true), "fas fa-sun");
        assert_eq!(icon_for(1000, false), "fas fa-moon");
    }

    #[test]
    fn test_partly_cloudy_day_and_night() {
        assert_eq!(icon_for(1003, true), "fas fa-cloud-sun");
        assert_eq!(icon_for(1003, false), "fas fa-cloud-moon");
    }

    #[test]
    fn test_night_flag_only_affects_clear_and_partly_cloudy() {
        for code in KNOWN_CODES.iter().filter(|c| **c != 1000 && **c != 1003) {
            assert_eq!(icon_for(*code, true), icon_for(*code, false), "code {}", code);
        }
    }

    #[test]
    fn test_every_known_code_has_an_icon() {
        for code in KNOWN_CODES {
            assert_ne!(icon_for(code, true), UNKNOWN_ICON, "code {}", code);
        }
    }

    #[test]
    fn test_selected_codes() {
        assert_eq!(icon_for(1009, true), "fas fa-cloud");
        assert_eq!(icon_for(1087, true), "fas fa-bolt");
        assert_eq!(icon_for(1117, true), "fas fa-wind");
        assert_eq!(icon_for(1153, true), "fas fa-cloud-drizzle");
        assert_eq!(icon_for(1195, true), "fas fa-cloud-showers-heavy");
        assert_eq!(icon_for(1237, true), "fas fa-cloud-meatball");
        assert_eq!(icon_for(1240, true), "fas fa-cloud-sun-rain");
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(icon_for(999, true), UNKNOWN_ICON);
        assert_eq!(icon_for(0, false), UNKNOWN_ICON);
        assert_eq!(icon_for(1999, true), UNKNOWN_ICON);
    }
}
