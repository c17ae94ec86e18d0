use mcd_describe::{
    table::{render_table, render_warehouses},
    warehouse::Warehouse,
};
use uuid::Uuid;

#[test]
fn render_table_aligns_columns() {
    let rows = vec![
        vec!["1".to_string(), "Alice".to_string()],
        vec!["2".to_string(), "Bob".to_string()],
    ];

    let rendered = render_table(&["id", "name"], &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines, vec!["id   name", "---  -----", "1    Alice", "2    Bob"]);
}

#[test]
fn render_table_normalizes_control_characters() {
    let rows = vec![vec!["line1\nline2\tvalue".to_string()]];

    let rendered = render_table(&["note"], &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "line1 line2 value");
}

#[test]
fn render_warehouses_lists_name_type_and_uuid() {
    let warehouses = vec![Warehouse {
        uuid: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
        name: "prod".to_string(),
        connection_type: "snowflake".to_string(),
    }];

    let rendered = render_warehouses(&warehouses);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "name  connection_type  uuid");
    assert_eq!(
        lines[2],
        "prod  snowflake        550e8400-e29b-41d4-a716-446655440000"
    );
}
