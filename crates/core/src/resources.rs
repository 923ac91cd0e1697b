//! Catalog of the back office's updatable resources.
//!
//! Each [`Resource`] ties a URL slug to its table, identifier column,
//! ownership scope and [`UpdateSchema`].

use std::sync::LazyLock;

use crate::patch::{
    emit, validate, FieldKind, FieldSpec, SparseInput, Statement, TimeFormat, UpdatePlan,
    UpdateRejection, UpdateSchema,
};
use crate::types::DbId;

/// Identifier column shared by every table.
pub const ID_COLUMN: &str = "ID";

/// Column holding the owning enterprise.
pub const OWNER_COLUMN: &str = "entreprise_id";

/// How a row is tied to the enterprise that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// The row carries the owner column itself.
    Column(&'static str),
    /// The row belongs to a parent row that carries the owner column.
    Parent {
        foreign_key: &'static str,
        table: &'static str,
        owner_column: &'static str,
    },
}

#[derive(Debug)]
pub struct Resource {
    /// URL segment, e.g. `events`.
    pub slug: &'static str,
    /// Human-readable name used in error messages.
    pub entity: &'static str,
    pub table: &'static str,
    pub owner: OwnerScope,
    pub schema: UpdateSchema,
}

impl Resource {
    /// Validate a sparse body for the record `id`.
    pub fn plan(&self, input: &SparseInput, id: Option<DbId>) -> Result<UpdatePlan, UpdateRejection> {
        validate(&self.schema, input, id)
    }

    pub fn statement(&self, plan: &UpdatePlan) -> Statement {
        emit(plan, self.table, self.schema.id_column())
    }
}

static CATALOG: LazyLock<Vec<Resource>> =
    LazyLock::new(|| vec![events(), pauses(), cars(), providers(), equipment()]);

pub fn all() -> &'static [Resource] {
    &CATALOG
}

pub fn find(slug: &str) -> Option<&'static Resource> {
    CATALOG.iter().find(|r| r.slug == slug)
}

fn schema(fields: Vec<FieldSpec>) -> UpdateSchema {
    UpdateSchema::new(ID_COLUMN, fields).expect("valid resource schema")
}

fn events() -> Resource {
    Resource {
        slug: "events",
        entity: "Event",
        table: "evenements",
        owner: OwnerScope::Column(OWNER_COLUMN),
        schema: schema(vec![
            FieldSpec::new("nom", FieldKind::String).required(),
            FieldSpec::new("description", FieldKind::String).nullable(),
            FieldSpec::new("lieu", FieldKind::String).required(),
            // Date pickers post "" when left untouched.
            FieldSpec::new("date_debut", FieldKind::Date).required().empty_as_absent(),
            FieldSpec::new("date_fin", FieldKind::Date).required().empty_as_absent(),
            FieldSpec::new("heure_debut", FieldKind::Time(TimeFormat::Either)).nullable(),
            FieldSpec::new("nbr_invite", FieldKind::Int).required(),
            FieldSpec::new("budget", FieldKind::Float).nullable(),
        ]),
    }
}

fn pauses() -> Resource {
    Resource {
        slug: "pauses",
        entity: "Pause",
        table: "pauses",
        owner: OwnerScope::Parent {
            foreign_key: "evenement_id",
            table: "evenements",
            owner_column: OWNER_COLUMN,
        },
        schema: schema(vec![
            FieldSpec::new("nom", FieldKind::String).required(),
            FieldSpec::new("start_time", FieldKind::Time(TimeFormat::HourMinute)).required(),
            FieldSpec::new("end_time", FieldKind::Time(TimeFormat::HourMinute)).required(),
            FieldSpec::new("description", FieldKind::String).nullable(),
        ]),
    }
}

fn cars() -> Resource {
    Resource {
        slug: "cars",
        entity: "Car",
        table: "cars",
        owner: OwnerScope::Column(OWNER_COLUMN),
        schema: schema(vec![
            FieldSpec::new("nom", FieldKind::String).required(),
            FieldSpec::new("prix", FieldKind::Float).required(),
            FieldSpec::new("categorie", FieldKind::String).required(),
            FieldSpec::new("immatriculation", FieldKind::String).nullable(),
            FieldSpec::new("disponible", FieldKind::Bool).required(),
        ]),
    }
}

fn providers() -> Resource {
    Resource {
        slug: "prestataires",
        entity: "Prestataire",
        table: "prestataires",
        owner: OwnerScope::Column(OWNER_COLUMN),
        schema: schema(vec![
            FieldSpec::new("nom", FieldKind::String).required(),
            FieldSpec::new("service", FieldKind::String).required(),
            FieldSpec::new("telephone", FieldKind::String).nullable(),
            FieldSpec::new("email", FieldKind::String).nullable(),
            FieldSpec::new("prix", FieldKind::Float).nullable(),
        ]),
    }
}

fn equipment() -> Resource {
    Resource {
        slug: "equipements",
        entity: "Equipement",
        table: "equipements",
        owner: OwnerScope::Column(OWNER_COLUMN),
        schema: schema(vec![
            FieldSpec::new("nom", FieldKind::String).required(),
            FieldSpec::new("categorie", FieldKind::String).required(),
            FieldSpec::new("sous_categorie", FieldKind::String).nullable(),
            FieldSpec::new("quantite", FieldKind::Int).required(),
            FieldSpec::new("prix", FieldKind::Float).nullable(),
            FieldSpec::new("disponible", FieldKind::Bool).required(),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{FieldErrorReason, SqlValue};
    use serde_json::json;

    fn body(value: serde_json::Value) -> SparseInput {
        SparseInput::from_value(value).expect("object body")
    }

    #[test]
    fn catalog_builds_and_slugs_are_unique() {
        let mut slugs: Vec<&str> = all().iter().map(|r| r.slug).collect();
        assert_eq!(slugs.len(), 5);
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 5);
    }

    #[test]
    fn find_by_slug() {
        assert_eq!(find("cars").map(|r| r.table), Some("cars"));
        assert_eq!(find("equipements").map(|r| r.entity), Some("Equipement"));
        assert!(find("users").is_none());
    }

    #[test]
    fn car_update_statement() {
        let cars = find("cars").expect("cars resource");
        let plan = cars
            .plan(&body(json!({ "nom": "Truck1", "ID": 7 })), Some(7))
            .expect("accepted");
        let statement = cars.statement(&plan);
        assert_eq!(statement.sql, r#"UPDATE cars SET nom=$1 WHERE "ID"=$2"#);
        assert_eq!(statement.values, vec![SqlValue::Text("Truck1".into()), SqlValue::Int(7)]);
    }

    #[test]
    fn event_ignores_blank_dates() {
        let events = find("events").expect("events resource");
        let plan = events
            .plan(
                &body(json!({ "date_debut": "", "date_fin": "", "nom": "Gala" })),
                Some(5),
            )
            .expect("accepted");
        assert_eq!(plan.columns(), vec!["nom"]);
    }

    #[test]
    fn pause_times_are_hour_minute() {
        let pauses = find("pauses").expect("pauses resource");
        assert!(matches!(pauses.owner, OwnerScope::Parent { table: "evenements", .. }));

        let result = pauses.plan(&body(json!({ "start_time": "25:00" })), Some(2));
        let errors = match result {
            Err(UpdateRejection::Fields(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        };
        assert_eq!(errors[0].field, "start_time");
        assert!(matches!(errors[0].reason, FieldErrorReason::BadFormat { .. }));

        let plan = pauses
            .plan(&body(json!({ "start_time": "14:30", "end_time": "15:00" })), Some(2))
            .expect("accepted");
        assert_eq!(
            pauses.statement(&plan).sql,
            r#"UPDATE pauses SET start_time=$1,end_time=$2 WHERE "ID"=$3"#
        );
    }

    #[test]
    fn equipment_rejects_unknown_columns() {
        let equipment = find("equipements").expect("equipment resource");
        let result = equipment.plan(
            &body(json!({ "quantite": 4, "entreprise_id": 99 })),
            Some(1),
        );
        assert!(matches!(
            result,
            Err(UpdateRejection::Fields(ref errors))
                if errors.len() == 1
                    && errors[0].field == "entreprise_id"
                    && errors[0].reason == FieldErrorReason::UnknownField
        ));
    }
}
