// Country code to locale resolution.
// The table maps ISO 3166 alpha-2 codes (lowercase) to the languages spoken
// in that country, most common first. It is kept sorted by code so lookups
// can binary search it.

const DEFAULT_LOCALE: &str = "en_US";

// Source: http://wiki.openstreetmap.org/wiki/Nominatim/Country_Codes
static COUNTRY_LANGUAGES: &[(&str, &str)] = &[
    ("ad", "ca"),
    ("ae", "ar"),
    ("af", "fa,ps"),
    ("ag", "en"),
    ("ai", "en"),
    ("al", "sq"),
    ("am", "hy"),
    ("an", "nl,en"),
    ("ao", "pt"),
    ("aq", "en"),
    ("ar", "es"),
    ("as", "en,sm"),
    ("at", "de"),
    ("au", "en"),
    ("aw", "nl,pap"),
    ("ax", "sv"),
    ("az", "az"),
    ("ba", "bs,hr,sr"),
    ("bb", "en"),
    ("bd", "bn"),
    ("be", "nl,fr,de"),
    ("bf", "fr"),
    ("bg", "bg"),
    ("bh", "ar"),
    ("bi", "fr"),
    ("bj", "fr"),
    ("bl", "fr"),
    ("bm", "en"),
    ("bn", "ms"),
    ("bo", "es,qu,ay"),
    ("bq", "nl,en"),
    ("br", "pt"),
    ("bs", "en"),
    ("bt", "dz"),
    ("bv", "no"),
    ("bw", "en,tn"),
    ("by", "be,ru"),
    ("bz", "en"),
    ("ca", "en,fr"),
    ("cc", "en"),
    ("cd", "fr"),
    ("cf", "fr"),
    ("cg", "fr"),
    ("ch", "de,fr,it,rm"),
    ("ci", "fr"),
    ("ck", "en,rar"),
    ("cl", "es"),
    ("cm", "fr,en"),
    ("cn", "zh"),
    ("co", "es"),
    ("cr", "es"),
    ("cu", "es"),
    ("cv", "pt"),
    ("cw", "nl"),
    ("cx", "en"),
    ("cy", "el,tr"),
    ("cz", "cs"),
    ("de", "de"),
    ("dj", "fr,ar,so"),
    ("dk", "da"),
    ("dm", "en"),
    ("do", "es"),
    ("dz", "ar"),
    ("ec", "es"),
    ("ee", "et"),
    ("eg", "ar"),
    ("eh", "ar,es,fr"),
    ("er", "ti,ar,en"),
    ("es", "es,ast,ca,eu,gl"),
    ("et", "am,om"),
    ("fi", "fi,sv,se"),
    ("fj", "en"),
    ("fk", "en"),
    ("fm", "en"),
    ("fo", "fo"),
    ("fr", "fr"),
    ("ga", "fr"),
    ("gb", "en,ga,cy,gd,kw"),
    ("gd", "en"),
    ("ge", "ka"),
    ("gf", "fr"),
    ("gg", "en"),
    ("gh", "en"),
    ("gi", "en"),
    ("gl", "kl,da"),
    ("gm", "en"),
    ("gn", "fr"),
    ("gp", "fr"),
    ("gq", "es,fr,pt"),
    ("gr", "el"),
    ("gs", "en"),
    ("gt", "es"),
    ("gu", "en,ch"),
    ("gw", "pt"),
    ("gy", "en"),
    ("hk", "zh,en"),
    ("hm", "en"),
    ("hn", "es"),
    ("hr", "hr"),
    ("ht", "fr,ht"),
    ("hu", "hu"),
    ("id", "id"),
    ("ie", "en,ga"),
    ("il", "he"),
    ("im", "en"),
    ("in", "hi,en"),
    ("io", "en"),
    ("iq", "ar,ku"),
    ("ir", "fa"),
    ("is", "is"),
    ("it", "it,de,fr"),
    ("je", "en"),
    ("jm", "en"),
    ("jo", "ar"),
    ("jp", "ja"),
    ("ke", "sw,en"),
    ("kg", "ky,ru"),
    ("kh", "km"),
    ("ki", "en"),
    ("km", "ar,fr"),
    ("kn", "en"),
    ("kp", "ko"),
    ("kr", "ko,en"),
    ("kw", "ar"),
    ("ky", "en"),
    ("kz", "kk,ru"),
    ("la", "lo"),
    ("lb", "ar,fr"),
    ("lc", "en"),
    ("li", "de"),
    ("lk", "si,ta"),
    ("lr", "en"),
    ("ls", "en,st"),
    ("lt", "lt"),
    ("lu", "lb,fr,de"),
    ("lv", "lv"),
    ("ly", "ar"),
    ("ma", "ar"),
    ("mc", "fr"),
    ("md", "ru,uk,ro"),
    ("me", "srp,sq,bs,hr,sr"),
    ("mf", "fr"),
    ("mg", "mg,fr"),
    ("mh", "en,mh"),
    ("mk", "mk"),
    ("ml", "fr"),
    ("mm", "my"),
    ("mn", "mn"),
    ("mo", "zh,en,pt"),
    ("mp", "ch"),
    ("mq", "fr"),
    ("mr", "ar,fr"),
    ("ms", "en"),
    ("mt", "mt,en"),
    ("mu", "mfe,fr,en"),
    ("mv", "dv"),
    ("mw", "en,ny"),
    ("mx", "es"),
    ("my", "ms,zh,en"),
    ("mz", "pt"),
    ("na", "en,sf,de"),
    ("nc", "fr"),
    ("ne", "fr"),
    ("nf", "en,pih"),
    ("ng", "en"),
    ("ni", "es"),
    ("nl", "nl"),
    ("no", "nb,nn,no,se"),
    ("np", "ne"),
    ("nr", "na,en"),
    ("nu", "niu,en"),
    ("nz", "en,mi"),
    ("om", "ar"),
    ("pa", "es"),
    ("pe", "es"),
    ("pf", "fr"),
    ("pg", "en,tpi,ho"),
    ("ph", "en,tl"),
    ("pk", "en,ur"),
    ("pl", "pl"),
    ("pm", "fr"),
    ("pn", "en,pih"),
    ("pr", "es,en"),
    ("ps", "ar,he"),
    ("pt", "pt"),
    ("pw", "en,pau,ja,sov,tox"),
    ("py", "es,gn"),
    ("qa", "ar"),
    ("re", "fr"),
    ("ro", "ro"),
    ("rs", "sr"),
    ("ru", "ru"),
    ("rw", "rw,fr,en"),
    ("sa", "ar"),
    ("sb", "en"),
    ("sc", "fr,en,crs"),
    ("sd", "ar,en"),
    ("se", "sv"),
    ("sg", "en,ms,zh,ta"),
    ("sh", "en"),
    ("si", "sl"),
    ("sj", "no"),
    ("sk", "sk"),
    ("sl", "en"),
    ("sm", "it"),
    ("sn", "fr"),
    ("so", "so,ar"),
    ("sr", "nl"),
    ("ss", "en"),
    ("st", "pt"),
    ("sv", "es"),
    ("sx", "nl,en"),
    ("sy", "ar"),
    ("sz", "en,ss"),
    ("tc", "en"),
    ("td", "fr,ar"),
    ("tf", "fr"),
    ("tg", "fr"),
    ("th", "th"),
    ("tj", "tg,ru"),
    ("tk", "tkl,en,sm"),
    ("tl", "pt,tet"),
    ("tm", "tk"),
    ("tn", "ar"),
    ("to", "en"),
    ("tr", "tr"),
    ("tt", "en"),
    ("tv", "en"),
    ("tw", "zh"),
    ("tz", "sw,en"),
    ("ua", "uk"),
    ("ug", "en,sw"),
    ("um", "en"),
    ("us", "en,es"),
    ("uy", "es"),
    ("uz", "uz,kaa"),
    ("va", "it"),
    ("vc", "en"),
    ("ve", "es"),
    ("vg", "en"),
    ("vi", "en"),
    ("vn", "vi"),
    ("vu", "bi,en,fr"),
    ("wf", "fr"),
    ("ws", "sm,en"),
    ("ye", "ar"),
    ("yt", "fr"),
    ("za", "zu,xh,af,st,tn,en"),
    ("zm", "en"),
    ("zw", "en,sn,nd"),
];

// Region codes the supplier uses that are not countries
fn alias(code: &str) -> Option<&'static str> {
    match code {
        "eu" => Some("en_GB"),
        "ap" => Some("en_US"), // Asia Pacific
        "cs" => Some("sr_RS"),
        _ => None,
    }
}

fn languages_for(code: &str) -> Option<&'static str> {
    COUNTRY_LANGUAGES
        .binary_search_by(|(country, _)| (*country).cmp(code))
        .ok()
        .map(|index| COUNTRY_LANGUAGES[index].1)
}

// Resolves a country code to its locale tags, joined by commas. Each
// language of the country yields one language_COUNTRY tag in table order,
// so "ch" gives "de_CH,fr_CH,it_CH,rm_CH". Unknown codes give "en_US".
pub fn resolve(country_code: &str) -> String {
    locales(country_code).join(",")
}

// Same as resolve, as a list
pub fn locales(country_code: &str) -> Vec<String> {
    let mut code = country_code.trim().to_lowercase();

    if let Some(locale) = alias(&code) {
        return vec![locale.to_string()];
    }

    if code == "uk" {
        code = "gb".to_string();
    }

    match languages_for(&code) {
        Some(languages) => {
            let country = code.to_uppercase();
            languages
                .split(',')
                .map(|language| format!("{}_{}", language, country))
                .collect()
        }
        None => vec![DEFAULT_LOCALE.to_string()],
    }
}

// Uppercased language part of the first locale, "DE" for "ch"
pub fn primary_language(country_code: &str) -> String {
    let locales = locales(country_code);
    let first = locales.first().map(String::as_str).unwrap_or(DEFAULT_LOCALE);
    first
        .split('_')
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in COUNTRY_LANGUAGES.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "table out of order at {} / {}",
                pair[0].0,
                pair[1].0
            );
        }
        assert!(COUNTRY_LANGUAGES.len() >= 240);
    }

    #[test_case("ch", "de_CH,fr_CH,it_CH,rm_CH"; "multilingual country keeps table order")]
    // the table lists Spanish for the US too; only the first tag is used
    #[test_case("us", "en_US,es_US"; "united states")]
    #[test_case("fr", "fr_FR"; "single language")]
    #[test_case("FR", "fr_FR"; "input is case insensitive")]
    #[test_case("zz", "en_US"; "unknown code falls back")]
    #[test_case("", "en_US"; "empty code falls back")]
    #[test_case("eu", "en_GB"; "europe alias")]
    #[test_case("ap", "en_US"; "asia pacific alias")]
    #[test_case("cs", "sr_RS"; "serbia and montenegro alias")]
    fn test_resolve(code: &str, expected: &str) {
        assert_eq!(resolve(code), expected);
    }

    #[test]
    fn test_uk_is_an_alias_for_gb() {
        assert_eq!(resolve("uk"), resolve("gb"));
        assert_eq!(resolve("UK"), "en_GB,ga_GB,cy_GB,gd_GB,kw_GB");
    }

    #[test_case("ch", "DE")]
    #[test_case("us", "EN")]
    #[test_case("fr", "FR")]
    #[test_case("me", "SRP")]
    #[test_case("zz", "EN")]
    #[test_case("cs", "SR")]
    fn test_primary_language(code: &str, expected: &str) {
        assert_eq!(primary_language(code), expected);
    }

    #[test]
    fn test_locales_matches_resolve() {
        assert_eq!(locales("be"), vec!["nl_BE", "fr_BE", "de_BE"]);
        assert_eq!(locales("be").join(","), resolve("be"));
    }
}
