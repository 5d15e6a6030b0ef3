//! Canned payloads in the upstream wire shapes.

use serde_json::{json, Value};

pub fn breaches() -> Vec<Value> {
    vec![
        json!({
            "breachID": "adobe",
            "breachedDate": "2013-10-04",
            "domain": "adobe.com",
            "exposedData": ["Email addresses", "Passwords", "Usernames"],
            "exposedRecords": 152000000,
            "exposureDescription": "Adobe breach in 2013",
            "industry": "Technology",
            "logo": "https://example.com/adobe.png",
            "passwordRisk": "high",
            "referenceURL": "https://example.com",
            "searchable": true,
            "sensitive": false,
            "verified": true
        }),
        json!({
            "breachID": "linkedin",
            "breachedDate": "2012-06-05",
            "domain": "linkedin.com",
            "exposedData": ["Email addresses", "Passwords"],
            "exposedRecords": 164000000,
            "exposureDescription": "LinkedIn breach in 2012",
            "industry": "Social",
            "logo": "https://example.com/linkedin.png",
            "passwordRisk": "high",
            "referenceURL": "https://example.com",
            "searchable": true,
            "sensitive": false,
            "verified": true
        }),
    ]
}

pub fn email_summary() -> Value {
    json!({"breaches": [["Adobe", "LinkedIn", "Dropbox"]]})
}

pub fn email_detailed(email: &str) -> Value {
    json!({
        "status": "success",
        "email": email,
        "breaches": [
            {
                "breach_id": "Adobe",
                "breached_date": "2013-10-04T00:00:00",
                "domain": "adobe.com",
                "industry": "Information Technology",
                "logo": "https://example.com/adobe.png",
                "password_risk": "hardtocrack",
                "searchable": "Yes",
                "sensitive": "No",
                "verified": "Yes",
                "xposed_data": "Email addresses;Password hints;Passwords;Usernames",
                "xposed_records": 152445165,
                "xposure_desc": "In October 2013, 153 million Adobe accounts were breached."
            },
            {
                "breach_id": "LinkedIn",
                "breached_date": "2012-05-05T00:00:00",
                "domain": "linkedin.com",
                "industry": "Social",
                "password_risk": "easytocrack",
                "searchable": "Yes",
                "sensitive": "No",
                "verified": "Yes",
                "xposed_data": "Email addresses;Passwords",
                "xposed_records": 164611595
            }
        ]
    })
}

pub fn analytics() -> Value {
    json!({
        "BreachesSummary": {"exposures": 5, "site": 3, "first_breach": "2013-10-04"},
        "ExposedBreaches": {
            "breaches_details": [{
                "breach": "Adobe",
                "details": "Adobe breach description",
                "domain": "adobe.com",
                "industry": "Technology",
                "logo": "https://example.com/adobe.png",
                "password_risk": "high",
                "references": "https://example.com",
                "searchable": true,
                "verified": true,
                "xposed_data": "email,password",
                "xposed_date": "2013-10-04",
                "xposed_records": 152000000
            }]
        },
        "BreachMetrics": {
            "industry": [{"name": "Technology", "count": 1}],
            "passwords_strength": [{"name": "weak", "count": 1}],
            "risk": [{"name": "high", "count": 1}],
            "xposed_data": [{"name": "email", "count": 1}],
            "yearwise_details": [{"year": 2013, "count": 1}]
        },
        "PastesSummary": {"cnt": 2}
    })
}

pub fn password(token: &str) -> Value {
    json!({
        "anon": token,
        "char": {"digits": 3, "alphabets": 8, "special": 0, "length": 11},
        "count": 12345
    })
}
