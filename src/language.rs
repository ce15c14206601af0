//! Language detection for page text
//!
//! Detection is best-effort: anything the detector cannot classify becomes
//! [`UNKNOWN_LANGUAGE`], which never passes an allow-set.

/// Sentinel code for text whose language could not be determined
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Classifies a text blob into a short language code
pub trait LanguageDetector: Send + Sync {
    /// Returns an ISO 639-1 code such as "en", or [`UNKNOWN_LANGUAGE`]
    fn detect(&self, text: &str) -> String;
}

/// Trigram-based detector backed by the `whatlang` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return UNKNOWN_LANGUAGE.to_string();
        }
        whatlang::detect(text)
            .and_then(|info| iso639_1(info.lang().code()))
            .unwrap_or(UNKNOWN_LANGUAGE)
            .to_string()
    }
}

/// Maps whatlang's ISO 639-3 codes to ISO 639-1 where one exists
fn iso639_1(code: &str) -> Option<&'static str> {
    let short = match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        _ => return None,
    };
    Some(short)
}
