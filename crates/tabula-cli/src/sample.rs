//! Employee sample table

use chrono::{Duration, Local, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tabula_core::{ColumnConfig, ColumnType, Row, TableDefinition};

const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Sales",
    "Support",
    "Product",
    "Design",
    "HR",
    "Finance",
];
const STATUSES: &[&str] = &["Active", "Inactive"];
const FIRST_NAMES: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella", "William",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Brown", "Taylor", "Miller", "Wilson", "Moore", "Anderson", "Thomas",
    "Jackson",
];

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("name", "Name", ColumnType::Text).with_width(200.0),
        ColumnConfig::new("email", "Email", ColumnType::Text).with_width(280.0),
        ColumnConfig::new("department", "Department", ColumnType::Select).with_width(150.0),
        ColumnConfig::new("salary", "Salary", ColumnType::Number).with_width(120.0),
        ColumnConfig::new("status", "Status", ColumnType::Select).with_width(110.0),
        ColumnConfig::new("joinDate", "Join Date", ColumnType::Text).with_width(140.0),
    ]
}

/// Build a table of `rows` random employees. The same seed gives the same
/// rows, except for join dates which are bounded by today's date.
pub fn employees(rows: usize, seed: Option<u64>) -> TableDefinition {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
    let span_days = (Local::now().date_naive() - start).num_days().max(1);

    let mut table = TableDefinition::new("employees", "Employees");
    table.columns = columns();
    table.data = (0..rows)
        .map(|i| {
            let first = pick(&mut rng, FIRST_NAMES);
            let last = pick(&mut rng, LAST_NAMES);
            let joined = start + Duration::days(rng.gen_range(0..span_days));

            Row::new((i + 1) as i64)
                .with("name", format!("{first} {last}"))
                .with(
                    "email",
                    format!(
                        "{}.{}{}@company.com",
                        first.to_lowercase(),
                        last.to_lowercase(),
                        i
                    ),
                )
                .with("department", pick(&mut rng, DEPARTMENTS))
                .with("salary", rng.gen_range(50_000i64..200_000))
                .with("status", pick(&mut rng, STATUSES))
                .with("joinDate", joined.format("%b %-d, %Y").to_string())
        })
        .collect();

    tracing::info!(rows, seed = ?seed, "Generated sample table");
    table
}
