//! # Report / Insert Catalog
//!
//! The named operations the menu dispatches to: nine canned reports and two
//! validated inserts over the agricultural monitoring schema. Each report is
//! a (title, SQL template, parameter specs) entry; each insert additionally
//! carries one validation chain per prompted field.
//!
//! The SQL strings are interchangeable content; the machinery that runs
//! them is not. [`run_report`] and [`run_insert`] drive the fixed pipeline
//! Validator → Executor → Renderer, and a validation failure aborts the
//! operation before any statement is issued.

use crate::cli::table;
use crate::database::Database;
use crate::error::AimsError;
use crate::types::Value;
use crate::validate::{is_valid_date, parse_in_range, parse_non_negative};

/// Tables the store is expected to carry; missing ones are a startup
/// warning, not an error.
pub const REQUIRED_TABLES: &[&str] = &[
    "field",
    "crop",
    "fieldcrop",
    "soilsample",
    "farmer",
    "season",
];

/// How one prompted scalar is validated and converted into a bound [`Value`].
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Integer key that must exist in `table.pk_col`.
    Key {
        table: &'static str,
        pk_col: &'static str,
    },
    /// Shape-checked `YYYY-MM-DD` date.
    Date,
    /// Empty input binds NULL (ongoing); otherwise shape-checked date.
    OptionalDate,
    /// Real number >= 0.
    NonNegative,
    /// Real number inside the closed interval.
    Range { lo: f64, hi: f64 },
    /// Free text, must not be empty.
    Text,
}

/// One prompted scalar: its name (for rejection messages), the prompt
/// label, and the rule chain applied to the raw input.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub prompt: &'static str,
    pub kind: FieldKind,
}

/// A read-only report: prompts for `params`, runs `sql`, renders the rows.
pub struct Report {
    pub title: &'static str,
    pub sql: &'static str,
    pub params: &'static [FieldSpec],
}

/// A validated single-statement insert.
pub struct Insert {
    pub title: &'static str,
    pub table: &'static str,
    pub sql: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static REPORTS: [Report; 9] = [
    Report {
        title: "All fields",
        sql: "SELECT fld_fieldkey AS id, fld_farmerkey AS farmer_id, \
              fld_soilkey AS soil_type, fld_area \
              FROM field ORDER BY fld_fieldkey",
        params: &[],
    },
    Report {
        title: "Crops by season",
        sql: "SELECT s.s_name AS season, c.c_name AS crop, \
              COUNT(fc.fldc_fieldkey) AS plantings \
              FROM season s \
              JOIN crop c ON c.c_preferredseason = s.s_seasonkey \
              LEFT JOIN fieldcrop fc ON fc.fldc_cropkey = c.c_cropkey \
              WHERE s.s_seasonkey = ?1 \
              GROUP BY c.c_cropkey",
        params: &[FieldSpec {
            name: "season_id",
            prompt: "season_id: ",
            kind: FieldKind::Key {
                table: "season",
                pk_col: "s_seasonkey",
            },
        }],
    },
    Report {
        title: "Average yield per field",
        sql: "SELECT fldc_fieldkey AS fieldkey, \
              ROUND(AVG(fldc_yield), 2) AS avg_yield, \
              COUNT(fldc_fieldkey) AS observations \
              FROM fieldcrop GROUP BY fldc_fieldkey ORDER BY fldc_fieldkey",
        params: &[],
    },
    Report {
        title: "Latest soil sample for a field",
        sql: "SELECT * FROM soilsample WHERE ss_fieldkey = ?1 \
              ORDER BY ss_sampledate DESC LIMIT 1",
        params: &[FieldSpec {
            name: "field_id",
            prompt: "field_id: ",
            kind: FieldKind::Key {
                table: "field",
                pk_col: "fld_fieldkey",
            },
        }],
    },
    Report {
        title: "Samples exceeding contaminant thresholds",
        sql: "SELECT ss.ss_samplekey, ss.ss_sampledate, fld.fld_fieldkey, \
              f.f_farmerkey, f.f_name || ' ' || f.f_surname AS farmer_name, \
              ss.ss_lead_ppm, ss.ss_cadmium_ppm, ss.ss_arsenic_ppm \
              FROM soilsample ss \
              JOIN field fld ON ss.ss_fieldkey = fld.fld_fieldkey \
              JOIN farmer f ON fld.fld_farmerkey = f.f_farmerkey \
              WHERE (ss.ss_lead_ppm IS NOT NULL AND ss.ss_lead_ppm > ?1) \
              OR (ss.ss_cadmium_ppm IS NOT NULL AND ss.ss_cadmium_ppm > ?2) \
              OR (ss.ss_arsenic_ppm IS NOT NULL AND ss.ss_arsenic_ppm > ?3) \
              ORDER BY ss.ss_sampledate DESC",
        params: &[
            FieldSpec {
                name: "lead_limit",
                prompt: "lead_limit (ppm) [example 100]: ",
                kind: FieldKind::NonNegative,
            },
            FieldSpec {
                name: "cadmium_limit",
                prompt: "cadmium_limit (ppm) [example 0.48]: ",
                kind: FieldKind::NonNegative,
            },
            FieldSpec {
                name: "arsenic_limit",
                prompt: "arsenic_limit (ppm) [example 10]: ",
                kind: FieldKind::NonNegative,
            },
        ],
    },
    Report {
        title: "Fields with no maintenance in the last 3 years",
        sql: "WITH last_maint AS ( \
                SELECT fldm_fieldkey, MAX(fldm_begindate) AS last_begindate \
                FROM fieldmaintenance \
                GROUP BY fldm_fieldkey \
              ) \
              SELECT fld.fld_fieldkey AS fieldkey, fld.fld_farmerkey AS farmerkey, \
              TRIM(f.f_name || ' ' || f.f_surname) AS farmer_name, \
              fld.fld_soilkey AS soilkey, lm.last_begindate \
              FROM field fld \
              LEFT JOIN last_maint lm ON fld.fld_fieldkey = lm.fldm_fieldkey \
              LEFT JOIN farmer f ON fld.fld_farmerkey = f.f_farmerkey \
              WHERE lm.last_begindate IS NULL \
              OR lm.last_begindate < date('now', '-3 years') \
              ORDER BY (lm.last_begindate IS NOT NULL), lm.last_begindate",
        params: &[],
    },
    Report {
        title: "Average NPK by soil texture (>=5 samples)",
        sql: "SELECT st.st_soil_texture AS soil_texture, \
              COUNT(ss.ss_samplekey) AS sample_count, \
              ROUND(AVG(ss.ss_nitrogen_ppm), 2) AS avg_nitrogen_ppm, \
              ROUND(AVG(ss.ss_phosphorus_ppm), 2) AS avg_phosphorus_ppm, \
              ROUND(AVG(ss.ss_potassium_ppm), 2) AS avg_potassium_ppm, \
              ROUND(AVG(ss.ss_cec), 2) AS avg_cec \
              FROM soilsample ss \
              JOIN field fld ON ss.ss_fieldkey = fld.fld_fieldkey \
              JOIN soiltype st ON fld.fld_soilkey = st.st_soilkey \
              GROUP BY st.st_soil_texture \
              HAVING COUNT(ss.ss_samplekey) >= 5 \
              ORDER BY st.st_soilkey DESC",
        params: &[],
    },
    Report {
        title: "Total yield per season",
        sql: "SELECT s.s_seasonkey, s.s_name, \
              ROUND(SUM(fc.fldc_yield), 2) AS total_yield, \
              COUNT(fc.fldc_fieldkey) AS plantings_count \
              FROM season s \
              JOIN crop c ON c.c_preferredseason = s.s_seasonkey \
              JOIN fieldcrop fc ON fc.fldc_cropkey = c.c_cropkey \
              GROUP BY s.s_seasonkey, s.s_name \
              ORDER BY total_yield DESC",
        params: &[],
    },
    Report {
        title: "Crop rotation history for a field",
        sql: "WITH crop_history AS ( \
                SELECT fc.fldc_fieldkey, fc.fldc_cropkey, fc.fldc_enddate, \
                ROW_NUMBER() OVER (PARTITION BY fc.fldc_fieldkey \
                                   ORDER BY fc.fldc_enddate DESC) AS rn \
                FROM fieldcrop fc \
                WHERE fc.fldc_fieldkey = ?1 \
              ) \
              SELECT cur.fldc_fieldkey, cur.fldc_cropkey AS current_cropkey, \
              prev.fldc_cropkey AS previous_cropkey, \
              c1.c_name AS current_crop_name, c2.c_name AS previous_crop_name \
              FROM crop_history cur \
              JOIN crop_history prev ON cur.fldc_fieldkey = prev.fldc_fieldkey \
              JOIN crop c1 ON cur.fldc_cropkey = c1.c_cropkey \
              JOIN crop c2 ON prev.fldc_cropkey = c2.c_cropkey \
              WHERE cur.rn = 1 AND prev.rn = 2 \
              AND cur.fldc_cropkey <> prev.fldc_cropkey",
        params: &[FieldSpec {
            name: "field_id",
            prompt: "field_id: ",
            kind: FieldKind::Key {
                table: "field",
                pk_col: "fld_fieldkey",
            },
        }],
    },
];

pub static INSERTS: [Insert; 2] = [
    Insert {
        title: "Insert new fieldcrop (planting/harvest)",
        table: "fieldcrop",
        sql: "INSERT INTO fieldcrop (fldc_fieldkey, fldc_cropkey, fldc_begindate, \
              fldc_enddate, fldc_yield, fldc_yield_unit) \
              VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        fields: &[
            FieldSpec {
                name: "field_id",
                prompt: "field_id: ",
                kind: FieldKind::Key {
                    table: "field",
                    pk_col: "fld_fieldkey",
                },
            },
            FieldSpec {
                name: "crop_id",
                prompt: "crop_id: ",
                kind: FieldKind::Key {
                    table: "crop",
                    pk_col: "c_cropkey",
                },
            },
            FieldSpec {
                name: "begin_date",
                prompt: "begin_date (YYYY-MM-DD): ",
                kind: FieldKind::Date,
            },
            FieldSpec {
                name: "end_date",
                prompt: "end_date (YYYY-MM-DD or empty if ongoing): ",
                kind: FieldKind::OptionalDate,
            },
            FieldSpec {
                name: "yield",
                prompt: "yield (>=0): ",
                kind: FieldKind::NonNegative,
            },
            FieldSpec {
                name: "unit",
                prompt: "unit (text): ",
                kind: FieldKind::Text,
            },
        ],
    },
    Insert {
        title: "Insert new soilsample",
        table: "soilsample",
        sql: "INSERT INTO soilsample (ss_fieldkey, ss_sampledate, ss_ph, \
              ss_nitrogen_ppm, ss_phosphorus_ppm, ss_potassium_ppm, \
              ss_organicmatter_pct) \
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        fields: &[
            FieldSpec {
                name: "field_id",
                prompt: "field_id: ",
                kind: FieldKind::Key {
                    table: "field",
                    pk_col: "fld_fieldkey",
                },
            },
            FieldSpec {
                name: "sample_date",
                prompt: "sample_date (YYYY-MM-DD): ",
                kind: FieldKind::Date,
            },
            FieldSpec {
                name: "ph",
                prompt: "ph (3.0 - 9.0): ",
                kind: FieldKind::Range { lo: 3.0, hi: 9.0 },
            },
            FieldSpec {
                name: "nitrogen_ppm",
                prompt: "nitrogen_ppm (>=0): ",
                kind: FieldKind::NonNegative,
            },
            FieldSpec {
                name: "phosphorus_ppm",
                prompt: "phosphorus_ppm (>=0): ",
                kind: FieldKind::NonNegative,
            },
            FieldSpec {
                name: "potassium_ppm",
                prompt: "potassium_ppm (>=0): ",
                kind: FieldKind::NonNegative,
            },
            FieldSpec {
                name: "organic_matter_pct",
                prompt: "organic_matter_pct (>=0): ",
                kind: FieldKind::NonNegative,
            },
        ],
    },
];

/// Checks one raw input against its field's rule chain and converts it into
/// the value that will be bound. Rules run left-to-right; the first failure
/// aborts with the reason, before any statement is issued.
pub fn validate_field(
    db: &Database,
    spec: &FieldSpec,
    raw: &str,
) -> Result<Value, AimsError> {
    match spec.kind {
        FieldKind::Key { table, pk_col } => {
            let key: i64 = raw.parse().map_err(|_| AimsError::Validation {
                field: spec.name,
                reason: "expected an integer key".to_string(),
            })?;
            if db.exists_as_key(table, pk_col, key)? {
                Ok(Value::Int(key))
            } else {
                Err(AimsError::NotFound { table, key })
            }
        }
        FieldKind::Date => {
            if is_valid_date(raw) {
                Ok(Value::Text(raw.to_string()))
            } else {
                Err(AimsError::Validation {
                    field: spec.name,
                    reason: "expected a YYYY-MM-DD date".to_string(),
                })
            }
        }
        FieldKind::OptionalDate => {
            if raw.is_empty() {
                Ok(Value::Null)
            } else if is_valid_date(raw) {
                Ok(Value::Text(raw.to_string()))
            } else {
                Err(AimsError::Validation {
                    field: spec.name,
                    reason: "expected a YYYY-MM-DD date or empty".to_string(),
                })
            }
        }
        FieldKind::NonNegative => match parse_non_negative(raw) {
            Some(v) => Ok(Value::Real(v)),
            None => Err(AimsError::Validation {
                field: spec.name,
                reason: "expected a non-negative number".to_string(),
            }),
        },
        FieldKind::Range { lo, hi } => match parse_in_range(raw, lo, hi) {
            Some(v) => Ok(Value::Real(v)),
            None => Err(AimsError::Validation {
                field: spec.name,
                reason: format!("expected a number between {lo} and {hi}"),
            }),
        },
        FieldKind::Text => {
            if raw.is_empty() {
                Err(AimsError::Validation {
                    field: spec.name,
                    reason: "must not be empty".to_string(),
                })
            } else {
                Ok(Value::Text(raw.to_string()))
            }
        }
    }
}

/// Compiles and runs a report with already-validated arguments and returns
/// the rendered table.
pub fn run_report(
    db: &Database,
    report: &Report,
    args: &[Value],
) -> Result<String, AimsError> {
    let mut stmt = db.prepare(report.sql)?;
    let mut cursor = stmt.query(args)?;
    table::render_rows(&mut cursor)
}

/// Executes an insert with already-validated values; returns rows affected.
/// The statement is a single atomic write, so there are no partial inserts.
pub fn run_insert(
    db: &Database,
    insert: &Insert,
    values: &[Value],
) -> Result<usize, AimsError> {
    let mut stmt = db.prepare(insert.sql)?;
    stmt.execute(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Database {
        let db = Database::open_in_memory().unwrap();
        for sql in [
            "CREATE TABLE field (fld_fieldkey INTEGER PRIMARY KEY, fld_farmerkey INTEGER, \
             fld_soilkey INTEGER, fld_area REAL)",
            "INSERT INTO field VALUES (1, 10, 100, 4.5)",
        ] {
            let mut stmt = db.prepare(sql).unwrap();
            stmt.execute(&[]).unwrap();
        }
        db
    }

    fn key_spec() -> FieldSpec {
        FieldSpec {
            name: "field_id",
            prompt: "field_id: ",
            kind: FieldKind::Key {
                table: "field",
                pk_col: "fld_fieldkey",
            },
        }
    }

    #[test]
    fn key_field_accepts_present_keys() {
        let db = fixture();
        let value = validate_field(&db, &key_spec(), "1").unwrap();
        assert_eq!(value, Value::Int(1));
    }

    #[test]
    fn key_field_rejects_absent_keys_as_not_found() {
        let db = fixture();
        let err = validate_field(&db, &key_spec(), "99").unwrap_err();
        match err {
            AimsError::NotFound { table, key } => {
                assert_eq!(table, "field");
                assert_eq!(key, 99);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn key_field_rejects_non_integers_before_probing() {
        let db = fixture();
        let err = validate_field(&db, &key_spec(), "one").unwrap_err();
        assert!(matches!(err, AimsError::Validation { field: "field_id", .. }));
    }

    #[test]
    fn optional_date_binds_null_when_empty() {
        let db = fixture();
        let spec = FieldSpec {
            name: "end_date",
            prompt: "end_date: ",
            kind: FieldKind::OptionalDate,
        };
        assert_eq!(validate_field(&db, &spec, "").unwrap(), Value::Null);
        assert_eq!(
            validate_field(&db, &spec, "2024-01-31").unwrap(),
            Value::Text("2024-01-31".to_string())
        );
        assert!(validate_field(&db, &spec, "Jan 31").is_err());
    }

    #[test]
    fn range_field_enforces_the_interval() {
        let db = fixture();
        let spec = FieldSpec {
            name: "ph",
            prompt: "ph: ",
            kind: FieldKind::Range { lo: 3.0, hi: 9.0 },
        };
        assert_eq!(validate_field(&db, &spec, "6.5").unwrap(), Value::Real(6.5));
        let err = validate_field(&db, &spec, "2.0").unwrap_err();
        assert!(err.to_string().contains("between 3 and 9"));
    }

    #[test]
    fn every_report_placeholder_has_a_param_spec() {
        for report in &REPORTS {
            let placeholders = (1..)
                .take_while(|n| report.sql.contains(&format!("?{n}")))
                .count();
            assert_eq!(
                placeholders,
                report.params.len(),
                "placeholder/param mismatch in '{}'",
                report.title
            );
        }
    }

    #[test]
    fn every_insert_field_has_a_placeholder() {
        for insert in &INSERTS {
            let placeholders = (1..)
                .take_while(|n| insert.sql.contains(&format!("?{n}")))
                .count();
            assert_eq!(placeholders, insert.fields.len(), "{}", insert.title);
        }
    }
}
