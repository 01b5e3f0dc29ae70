// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use paysim_domain::{Decimal, Employee, EmployeeRef};
use serde_json::json;
use std::collections::BTreeMap;

use crate::external_hr::extract_records;
use crate::{
    ExternalHrClient, ExternalHrConfig, ExternalQuery, ExternalQueryError, ExternalRecord,
    external_employees_response, external_query_response, format_parameters,
    map_external_employees, parse_parameter_string,
};

fn record(value: serde_json::Value) -> ExternalRecord {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn test_validate_requires_codes() {
    assert!(ExternalQuery::new("Q1", "0", "P").validate().is_ok());

    assert_eq!(
        ExternalQuery::new(" ", "1", "P").validate(),
        Err(ExternalQueryError::InvalidQuery(String::from(
            "query_code is required"
        )))
    );
    assert_eq!(
        ExternalQuery::new("Q1", "", "P").validate(),
        Err(ExternalQueryError::InvalidQuery(String::from(
            "company_code is required"
        )))
    );
    assert_eq!(
        ExternalQuery::new("Q1", "1", "").validate(),
        Err(ExternalQueryError::InvalidQuery(String::from(
            "system_code is required"
        )))
    );
}

#[test]
fn test_validate_rejects_codes_that_escape_the_query_path() {
    for code in ["X/../../../admin/users?drop=1#", "..", "Q1 Q2", "Q%2F"] {
        assert!(
            matches!(
                ExternalQuery::new(code, "0", "P").validate(),
                Err(ExternalQueryError::InvalidQuery(_))
            ),
            "{code} was accepted"
        );
    }
    assert!(matches!(
        ExternalQuery::new("Q1", "0", "P#x").validate(),
        Err(ExternalQueryError::InvalidQuery(_))
    ));
    assert_eq!(
        ExternalQuery::new("Q1", "A1", "P").validate(),
        Err(ExternalQueryError::InvalidQuery(String::from(
            "company_code must be numeric"
        )))
    );
    assert!(ExternalQuery::new("NIS.FOL-00_88", "10", "P").validate().is_ok());

    let hostile: ExternalQuery = ExternalQuery::new("X/../admin", "0", "P");
    assert!(hostile.url("https://hr.example.com").is_err());
}

#[test]
fn test_url_keeps_base_path_prefix() {
    let query: ExternalQuery = ExternalQuery::new("Q1", "0", "P");
    let url = query.url("https://hr.example.com/rm").unwrap();
    assert_eq!(
        url.path(),
        "/rm/api/framework/v1/consultaSQLServer/RealizaConsulta/Q1/0/P"
    );
}

#[test]
fn test_parameters_round_trip_and_keep_leading_zeros() {
    let mut params: BTreeMap<String, String> = BTreeMap::new();
    params.insert(String::from("CHAPA"), String::from("004071"));
    params.insert(String::from("CODCOLIGADA"), String::from("1"));

    let formatted: String = format_parameters(&params);
    assert_eq!(formatted, "CHAPA=004071;CODCOLIGADA=1");
    assert_eq!(parse_parameter_string(&formatted), params);
}

#[test]
fn test_parse_parameter_string_edge_cases() {
    let parsed: BTreeMap<String, String> = parse_parameter_string("A=1; B=x=y;junk;=5; ");
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed["A"], "1");
    assert_eq!(parsed["B"], "x=y");
    assert!(parse_parameter_string("").is_empty());
}

#[test]
fn test_query_path_and_url() {
    let mut query: ExternalQuery = ExternalQuery::new("NISFOL0088", "1", "P");
    assert_eq!(
        query.path(),
        "/api/framework/v1/consultaSQLServer/RealizaConsulta/NISFOL0088/1/P"
    );

    let config: ExternalHrConfig = ExternalHrConfig::new("https://hr.example.com//", "u", "p");
    assert_eq!(config.base_url, "https://hr.example.com");

    let url = query.url(&config.base_url).unwrap();
    assert_eq!(url.query(), None);

    query
        .params
        .insert(String::from("CHAPA"), String::from("004071"));
    query.params.insert(String::from("ATIVO"), String::from("S"));
    let url = query.url(&config.base_url).unwrap();
    assert_eq!(url.path(), query.path());
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![(
            String::from("parameters"),
            String::from("ATIVO=S;CHAPA=004071")
        )]
    );
}

#[test]
fn test_config_from_parts_requires_everything() {
    assert!(ExternalHrConfig::from_parts(Some("https://hr"), Some("u"), Some("p")).is_some());
    assert!(ExternalHrConfig::from_parts(Some("https://hr"), Some(" "), Some("p")).is_none());
    assert!(ExternalHrConfig::from_parts(None, Some("u"), Some("p")).is_none());
}

#[test]
fn test_extract_records_shapes() {
    assert_eq!(extract_records(json!([{"A": 1}, 2, {"B": 2}])).len(), 2);
    assert_eq!(extract_records(json!({"dados": [{"A": 1}]})).len(), 1);
    assert_eq!(extract_records(json!({"data": [{"A": 1}, {"A": 2}]})).len(), 2);
    assert_eq!(extract_records(json!({"records": []})).len(), 0);
    assert_eq!(extract_records(json!({"A": 1})).len(), 1);
    assert!(extract_records(json!({"message": "no rows"})).is_empty());
    assert!(extract_records(json!("text")).is_empty());
}

#[test]
fn test_map_external_employees() {
    let records: Vec<ExternalRecord> = vec![
        record(json!({
            "CHAPA_FUNC": "004071",
            "NOME_FUNC": "Diego Alves",
            "FUNCAO_FUNC": "Coordinator",
            "SALARIO_FUNC": 6100.5
        })),
        record(json!({
            "CHAPA": "004072",
            "NOME": "Eva Rocha",
            "CARGO": "Clerk",
            "SALARIO": "2.300,00"
        })),
        record(json!({"CHAPA": "004073", "NOME": "No Title", "SALARIO": "100"})),
        record(json!({"CHAPA": "004074", "NOME": "Bad Pay", "CARGO": "Clerk", "SALARIO": "n/a"})),
        record(json!({"CHAPA": "004074", "NOME": "Zero", "CARGO": "Clerk", "SALARIO": 0})),
        record(json!({"CHAPA": "004071", "NOME": "Repeat", "CARGO": "Clerk", "SALARIO": 1})),
    ];

    let employees: Vec<Employee> = map_external_employees(&records);
    assert_eq!(employees.len(), 2);

    assert_eq!(
        employees[0].reference,
        EmployeeRef::External(String::from("004071"))
    );
    assert_eq!(employees[0].badge, "004071");
    assert_eq!(employees[0].salary, Decimal::new(61_005, 1));
    assert!(employees[0].active);

    assert_eq!(employees[1].name, "Eva Rocha");
    assert_eq!(employees[1].salary, Decimal::from(2300));

    let response = external_employees_response(&records);
    assert_eq!(response.employees.len(), 2);
    assert_eq!(response.skipped, 4);
}

#[test]
fn test_external_query_response_shapes() {
    let ok = external_query_response(Ok(vec![record(json!({"A": 1}))]));
    assert!(ok.success);
    assert_eq!(ok.data.as_ref().map(Vec::len), Some(1));
    assert!(ok.error.is_none());

    let failed = external_query_response(Err(ExternalQueryError::Http {
        status: 401,
        message: String::from("Invalid or missing credentials"),
    }));
    assert!(!failed.success);
    let error = failed.error.unwrap();
    assert_eq!(error.code, "HTTP_ERROR");
    assert_eq!(error.status, Some(401));

    let body = serde_json::to_value(external_query_response(Err(
        ExternalQueryError::NotConfigured,
    )))
    .unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("NOT_CONFIGURED"));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_run_query_validates_before_sending() {
    let client: ExternalHrClient =
        ExternalHrClient::new(ExternalHrConfig::new("http://127.0.0.1:9", "u", "p")).unwrap();

    let err = client
        .run_query(&ExternalQuery::new("", "1", "P"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_QUERY");
}

#[tokio::test]
async fn test_run_query_reports_unreachable_host() {
    let client: ExternalHrClient =
        ExternalHrClient::new(ExternalHrConfig::new("http://127.0.0.1:9", "u", "p")).unwrap();

    let err = client
        .run_query(&ExternalQuery::new("Q1", "1", "P"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExternalQueryError::Network(_) | ExternalQueryError::Timeout(_)
    ));
}
