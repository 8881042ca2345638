pub mod kopis;
pub mod naver_geocode;
