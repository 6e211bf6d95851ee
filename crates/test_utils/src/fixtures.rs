//! Pre-built test data
//!
//! Fixed values used across the test suite. Anything random belongs in
//! `generators`; anything configurable belongs in `builders`.

use serde_json::{json, Value};

/// Legacy-shaped record payloads as they arrive from sheets and forms
pub struct PayloadFixtures;

impl PayloadFixtures {
    /// A fully populated payload in snake_case keys
    pub fn full_record() -> Value {
        json!({
            "case_no": "2025-1042",
            "accident_time": "2025-08-14T02:30:00Z",
            "customer_name": "김민준",
            "phone": "010-1234-5678",
            "car_number": "12가3456",
            "car_model": "현대 아반떼",
            "insurer": "삼성화재",
            "damage_type": "앞유리",
            "accident_location": "서울시 강남구 테헤란로 123",
            "deductible": "50000",
            "deductible_pay_type": "현장수납",
            "status": "접수완료"
        })
    }

    /// The same record shaped the way the old camelCase exporter wrote it
    pub fn camel_case_record() -> Value {
        json!({
            "receiptNumber": "2025-1042",
            "accidentTime": "2025-08-14T02:30:00Z",
            "customerName": "김민준",
            "carNumber": "12가3456",
            "carModel": "현대 아반떼",
            "insurance": "삼성화재",
            "damageType": "앞유리",
            "accidentLocation": "서울시 강남구 테헤란로 123",
            "deductiblePayType": "현장수납",
            "status": "접수됨"
        })
    }

    /// A minimal payload carrying only the natural key
    pub fn minimal_record() -> Value {
        json!({ "case_no": "2025-0001" })
    }
}

/// Raw insurer handoff messages
pub struct MessageFixtures;

impl MessageFixtures {
    /// A typical multi-line KakaoTalk handoff
    pub fn insurer_handoff() -> &'static str {
        "삼성화재 접수건 전달드립니다.\n\
         김민준 고객님 010-1234-5678\n\
         현대 아반떼 12가3456 앞유리 파손\n\
         면책금 5만원, 서울시 강남구 테헤란로 123 5층"
    }

    /// A terse one-liner with only a car number and damage type
    pub fn terse_handoff() -> &'static str {
        "34나5678 뒤유리 교체건"
    }
}

/// Legacy sheet contents
pub struct SheetFixtures;

impl SheetFixtures {
    pub fn vehicle_sheet() -> &'static str {
        "제조사,차량명,차급\n현대,아반떼,소형\n기아,K8,중형\n제네시스,G90,대형\n"
    }

    pub fn workshop_sheet() -> &'static str {
        "상호,주소,전화번호\n강남공업사,서울시 강남구 논현로 10,02-555-0001\n수원공업사,경기도 수원시 팔달구 중부대로 55,031-222-0002\n"
    }
}
