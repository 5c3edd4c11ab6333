//! MeteoSwiss weather-symbol codes.
//!
//! Codes 1..=42 are the daytime symbols, 101..=142 the night variants of the
//! same 42 situations. Both live in one flat table sorted by code.

pub const UNKNOWN: &str = "unknown";

static WEATHER_CODES: [(u16, &str); 84] = [
    (1, "sunny"),
    (2, "mostly sunny, some clouds"),
    (3, "partly sunny, thick passing clouds"),
    (4, "overcast"),
    (5, "very cloudy"),
    (6, "sunny intervals, isolated showers"),
    (7, "sunny intervals, isolated sleet"),
    (8, "sunny intervals, snow showers"),
    (9, "overcast, some rain showers"),
    (10, "overcast, some sleet"),
    (11, "overcast, some snow showers"),
    (12, "sunny intervals, chance of thunderstorms"),
    (13, "sunny intervals, possible thunderstorms"),
    (14, "very cloudy, light rain"),
    (15, "very cloudy, light sleet"),
    (16, "very cloudy, light snow showers"),
    (17, "very cloudy, intermittent rain"),
    (18, "very cloudy, intermittent sleet"),
    (19, "very cloudy, intermittent snow"),
    (20, "very overcast with rain"),
    (21, "very overcast with frequent sleet"),
    (22, "very overcast with heavy snow"),
    (23, "very overcast, slight chance of storms"),
    (24, "very overcast with storms"),
    (25, "very cloudy, very stormy"),
    (26, "high clouds"),
    (27, "stratus"),
    (28, "fog"),
    (29, "sunny intervals, scattered showers"),
    (30, "sunny intervals, scattered snow showers"),
    (31, "sunny intervals, scattered sleet"),
    (32, "sunny intervals, some showers"),
    (33, "short sunny intervals, frequent rain"),
    (34, "short sunny intervals, frequent snowfalls"),
    (35, "overcast and dry"),
    (36, "partly sunny, slightly stormy"),
    (37, "partly sunny, stormy snow showers"),
    (38, "overcast, thundery showers"),
    (39, "overcast, thundery snow showers"),
    (40, "very cloudy, slightly stormy"),
    (41, "overcast, slightly stormy"),
    (42, "very cloudy, thundery snow showers"),
    (101, "clear"),
    (102, "slightly overcast"),
    (103, "heavy cloud formations"),
    (104, "overcast"),
    (105, "very cloudy"),
    (106, "overcast, scattered rain showers"),
    (107, "overcast, scattered rain and snow showers"),
    (108, "overcast, snow showers"),
    (109, "overcast, some showers"),
    (110, "overcast, some rain and snow showers"),
    (111, "overcast, some snow showers"),
    (112, "slightly overcast, some thunderstorms"),
    (113, "slightly overcast, possible thunderstorms"),
    (114, "very cloudy, light rain"),
    (115, "very cloudy, light rain and snow showers"),
    (116, "very cloudy, light snowfall"),
    (117, "very cloudy, intermittent rain"),
    (118, "very cloudy, intermittent mixed rain and snowfall"),
    (119, "very cloudy, intermittent snowfall"),
    (120, "very cloudy, constant rain"),
    (121, "very cloudy, frequent rain and snowfall"),
    (122, "very cloudy, heavy snowfall"),
    (123, "very cloudy, slight chance of storms"),
    (124, "very cloudy, stormy"),
    (125, "very cloudy, storms"),
    (126, "high cloud"),
    (127, "stratus"),
    (128, "fog"),
    (129, "slightly overcast, scattered showers"),
    (130, "slightly overcast, scattered snowfall"),
    (131, "slightly overcast, rain and snow showers"),
    (132, "slightly overcast, some showers"),
    (133, "overcast, frequent rain showers"),
    (134, "overcast, frequent snow showers"),
    (135, "overcast and dry"),
    (136, "slightly overcast, slightly stormy"),
    (137, "slightly overcast, stormy snow showers"),
    (138, "overcast, thundery showers"),
    (139, "overcast, thundery snow showers"),
    (140, "very cloudy, slightly stormy"),
    (141, "overcast, slightly stormy"),
    (142, "very cloudy, thundery snow showers"),
];

/// Human-readable phrase for a weather-symbol code, or [`UNKNOWN`].
pub fn describe(code: i64) -> &'static str {
    let Ok(code) = u16::try_from(code) else {
        return UNKNOWN;
    };

    WEATHER_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| WEATHER_CODES[idx].1)
        .unwrap_or(UNKNOWN)
}
