//! Geocoding adapter
//!
//! Implements the `Geocoder` port against the Kakao Local API. Everything
//! above this crate depends on the port, not on Kakao.

pub mod kakao;

pub use kakao::KakaoGeocoder;
