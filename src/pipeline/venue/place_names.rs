use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Seoul autonomous districts and other frequent `-gu` districts, as
/// romanized stem and Korean name.
const DISTRICTS: &[(&str, &str)] = &[
    ("Gangnam", "강남구"),
    ("Seocho", "서초구"),
    ("Songpa", "송파구"),
    ("Gangdong", "강동구"),
    ("Jongno", "종로구"),
    ("Jung", "중구"),
    ("Yongsan", "용산구"),
    ("Mapo", "마포구"),
    ("Seodaemun", "서대문구"),
    ("Dongdaemun", "동대문구"),
    ("Seongdong", "성동구"),
    ("Gwangjin", "광진구"),
    ("Jungnang", "중랑구"),
    ("Seongbuk", "성북구"),
    ("Gangbuk", "강북구"),
    ("Dobong", "도봉구"),
    ("Nowon", "노원구"),
    ("Eunpyeong", "은평구"),
    ("Yangcheon", "양천구"),
    ("Gangseo", "강서구"),
    ("Guro", "구로구"),
    ("Geumcheon", "금천구"),
    ("Yeongdeungpo", "영등포구"),
    ("Dongjak", "동작구"),
    ("Gwanak", "관악구"),
    ("Haeundae", "해운대구"),
    ("Suyeong", "수영구"),
    ("Busanjin", "부산진구"),
    ("Yeonsu", "연수구"),
    ("Bupyeong", "부평구"),
    ("Suseong", "수성구"),
    ("Yuseong", "유성구"),
    ("Bundang", "분당구"),
    ("Ilsandong", "일산동구"),
];

/// Cities, provinces and well-known venue roads.
const PLACES: &[(&str, &str)] = &[
    ("Seoul Special City", "서울특별시"),
    ("Seoul", "서울"),
    ("Busan Metropolitan City", "부산광역시"),
    ("Busan", "부산"),
    ("Incheon Metropolitan City", "인천광역시"),
    ("Incheon", "인천"),
    ("Daegu Metropolitan City", "대구광역시"),
    ("Daegu", "대구"),
    ("Daejeon Metropolitan City", "대전광역시"),
    ("Daejeon", "대전"),
    ("Gwangju Metropolitan City", "광주광역시"),
    ("Gwangju", "광주"),
    ("Ulsan", "울산"),
    ("Sejong", "세종"),
    ("Gyeonggi-do", "경기도"),
    ("Gyeonggi", "경기"),
    ("Gangwon-do", "강원도"),
    ("Jeju-do", "제주도"),
    ("Jeju", "제주"),
    ("Seongnam-si", "성남시"),
    ("Seongnam", "성남"),
    ("Suwon-si", "수원시"),
    ("Suwon", "수원"),
    ("Goyang-si", "고양시"),
    ("Goyang", "고양"),
    ("Teheran-ro", "테헤란로"),
    ("Daehak-ro", "대학로"),
    ("Nambusunhwan-ro", "남부순환로"),
    ("Olympic-ro", "올림픽로"),
    ("Sejong-daero", "세종대로"),
    ("Itaewon-ro", "이태원로"),
    ("Yanghwa-ro", "양화로"),
];

/// Japanese and Chinese renderings. These scripts have no word separators,
/// so they are replaced as plain substrings.
const CJK_PLACES: &[(&str, &str)] = &[
    ("ソウル特別市", "서울특별시"),
    ("ソウル", "서울"),
    ("首尔市", "서울특별시"),
    ("首爾市", "서울특별시"),
    ("首尔", "서울"),
    ("首爾", "서울"),
    ("釜山広域市", "부산광역시"),
    ("釜山广域市", "부산광역시"),
    ("釜山", "부산"),
    ("仁川", "인천"),
    ("大邱", "대구"),
    ("大田", "대전"),
    ("光州", "광주"),
    ("京畿道", "경기도"),
    ("江南区", "강남구"),
    ("江南區", "강남구"),
    ("瑞草区", "서초구"),
    ("瑞草區", "서초구"),
    ("松坡区", "송파구"),
    ("松坡區", "송파구"),
    ("鍾路区", "종로구"),
    ("钟路区", "종로구"),
    ("鍾路區", "종로구"),
    ("龍山区", "용산구"),
    ("龙山区", "용산구"),
    ("麻浦区", "마포구"),
    ("麻浦區", "마포구"),
    ("中区", "중구"),
    ("中區", "중구"),
    ("海雲台区", "해운대구"),
    ("海云台区", "해운대구"),
];

/// Immutable foreign-name → Korean lookup, built once on first use.
pub struct PlaceNameTable {
    latin: Regex,
    latin_names: HashMap<String, &'static str>,
    cjk_names: Vec<(&'static str, &'static str)>,
}

impl PlaceNameTable {
    fn build() -> Self {
        let mut latin_names: HashMap<String, &'static str> = HashMap::new();
        for &(stem, korean) in DISTRICTS {
            latin_names.insert(format!("{} district", stem.to_lowercase()), korean);
            latin_names.insert(format!("{}-gu", stem.to_lowercase()), korean);
        }
        for &(name, korean) in PLACES {
            latin_names.insert(name.to_lowercase(), korean);
        }

        // Longest first so "Seoul Special City" wins over "Seoul".
        let mut keys: Vec<&String> = latin_names.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        let latin = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
            .expect("place-name pattern is built from escaped literals");

        let mut cjk_names = CJK_PLACES.to_vec();
        cjk_names.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        Self { latin, latin_names, cjk_names }
    }

    /// Replaces every known foreign place name in `text` with its Korean form.
    /// Romanized names only match as whole words.
    pub fn substitute(&self, text: &str) -> String {
        let replaced = self.latin.replace_all(text, |caps: &regex::Captures| {
            let matched = &caps[0];
            self.latin_names
                .get(&matched.to_lowercase())
                .map(|k| (*k).to_string())
                .unwrap_or_else(|| matched.to_string())
        });

        let mut out = replaced.into_owned();
        for (foreign, korean) in &self.cjk_names {
            if out.contains(foreign) {
                // Keep the Korean name apart from neighbouring text.
                out = out.replace(foreign, &format!(" {korean} "));
            }
        }
        out
    }
}

pub static PLACE_NAMES: Lazy<PlaceNameTable> = Lazy::new(PlaceNameTable::build);
