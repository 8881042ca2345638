//! Registry and geocoder constants shared across the application.

pub const KOPIS_BASE_URL: &str = "http://www.kopis.or.kr/openApi/restful";
pub const NAVER_MAPS_BASE_URL: &str = "https://naveropenapi.apigw.ntruss.com";

// Environment variables (read once at startup)
pub const KOPIS_API_KEY_ENV: &str = "KOPIS_API_KEY";
pub const NAVER_CLIENT_ID_ENV: &str = "NAVER_CLIENT_ID";
pub const NAVER_CLIENT_SECRET_ENV: &str = "NAVER_CLIENT_SECRET";

/// Rows requested from the registry per call.
pub const REGISTRY_ROWS: u32 = 100;

/// Items shown per page on the listing screen.
pub const PAGE_SIZE: usize = 20;

/// Shown instead of an address when every fallback is exhausted.
pub const ADDRESS_NOT_FOUND: &str = "위치 정보를 찾을 수 없습니다";

/// Country names some geocoders put in front of a formatted address.
pub const COUNTRY_PREFIXES: &[&str] = &["Republic of Korea", "South Korea", "Korea", "대한민국"];

pub const DEFAULT_CATEGORY_CODE: &str = "GGGA";

/// A selectable `(label, code)` pair. An empty code means "no restriction".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const REGIONS: &[CodeOption] = &[
    CodeOption { label: "전체 지역", value: "" },
    CodeOption { label: "서울", value: "11" },
    CodeOption { label: "경기", value: "41" },
    CodeOption { label: "인천", value: "28" },
    CodeOption { label: "부산", value: "26" },
    CodeOption { label: "대구", value: "27" },
    CodeOption { label: "대전", value: "30" },
    CodeOption { label: "광주", value: "29" },
];

pub const CATEGORIES: &[CodeOption] = &[
    CodeOption { label: "전체 장르", value: "" },
    CodeOption { label: "뮤지컬", value: "GGGA" },
    CodeOption { label: "연극", value: "AAAA" },
    CodeOption { label: "클래식", value: "CCCA" },
    CodeOption { label: "대중음악", value: "CCCD" },
];

pub const SORT_OPTIONS: &[CodeOption] = &[
    CodeOption { label: "날짜 오름차순", value: "ASC" },
    CodeOption { label: "날짜 내림차순", value: "DESC" },
];

/// Looks up the display label for a code in one of the option tables.
pub fn label_for(options: &[CodeOption], value: &str) -> Option<&'static str> {
    options.iter().find(|o| o.value == value).map(|o| o.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        assert_eq!(label_for(REGIONS, "26"), Some("부산"));
        assert_eq!(label_for(CATEGORIES, ""), Some("전체 장르"));
        assert_eq!(label_for(CATEGORIES, "ZZZZ"), None);
    }

    #[test]
    fn test_sort_options_parse() {
        for option in SORT_OPTIONS {
            assert!(option.value.parse::<crate::common::types::SortDirection>().is_ok());
        }
    }
}
