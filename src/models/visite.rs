// src/models/visite.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

pub const STATUT_SOUMIS: &str = "soumis";

// =============================================================================
//  LINHAS DO BANCO
// =============================================================================

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Visite {
    pub id: i32,
    pub merchandiser_id: i32,
    pub client_id: i32,

    #[schema(value_type = String, format = Date, example = "2026-10-17")]
    pub date_visite: NaiveDate,

    #[schema(value_type = Option<String>, example = "09:15:00")]
    pub heure_arrivee: Option<NaiveTime>,

    #[schema(value_type = Option<String>, example = "09:40:00")]
    pub heure_depart: Option<NaiveTime>,

    #[schema(example = "soumis")]
    pub statut_validation: String,

    pub observations_generales: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct ReleveStock {
    pub id: i32,
    pub visite_id: i32,
    pub produit_id: i32,
    pub quantite_en_stock: i32,
    pub est_en_rupture: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct LigneCommande {
    pub id: i32,
    pub visite_id: i32,
    pub produit_id: i32,
    pub quantite_commandee: i32,
}

// A visita junto com os filhos gravados na mesma transação
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisiteDetail {
    #[serde(flatten)]
    pub visite: Visite,
    pub releves_stock: Vec<ReleveStock>,
    pub lignes_commande: Vec<LigneCommande>,
}

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReleveStockCreate {
    #[schema(example = 1)]
    pub produit_id: i32,

    #[validate(range(min = 0, message = "La quantité en stock ne peut pas être négative."))]
    #[schema(example = 5)]
    pub quantite_en_stock: i32,

    #[serde(default)]
    pub est_en_rupture: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LigneCommandeCreate {
    #[schema(example = 1)]
    pub produit_id: i32,

    #[validate(range(min = 1, message = "La quantité commandée doit être au moins 1."))]
    #[schema(example = 10)]
    pub quantite_commandee: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VisiteCreate {
    #[schema(example = 1)]
    pub client_id: i32,

    // Ausente = data de hoje (default do banco)
    #[schema(value_type = Option<String>, format = Date, example = "2026-10-17")]
    pub date_visite: Option<NaiveDate>,

    #[schema(value_type = Option<String>, example = "09:15:00")]
    pub heure_arrivee: Option<NaiveTime>,

    #[schema(value_type = Option<String>, example = "09:40:00")]
    pub heure_depart: Option<NaiveTime>,

    pub observations_generales: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(nested)]
    pub releves_stock: Vec<ReleveStockCreate>,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(nested)]
    pub lignes_commande: Vec<LigneCommandeCreate>,
}

// Campos escalares da visita, já separados das listas de detalhes
#[derive(Debug, Clone)]
pub struct NewVisite {
    pub merchandiser_id: i32,
    pub client_id: i32,
    pub date_visite: Option<NaiveDate>,
    pub heure_arrivee: Option<NaiveTime>,
    pub heure_depart: Option<NaiveTime>,
    pub observations_generales: Option<String>,
}

impl VisiteCreate {
    /// Validação do `validator` mais a regra de consistência dos horários.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Err(e) = self.validate_horaires() {
            errors.add("heure_depart", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn validate_horaires(&self) -> Result<(), ValidationError> {
        if let (Some(arrivee), Some(depart)) = (self.heure_arrivee, self.heure_depart) {
            if depart < arrivee {
                let mut err = ValidationError::new("horaires");
                err.message = Some("L'heure de départ précède l'heure d'arrivée.".into());
                return Err(err);
            }
        }
        Ok(())
    }

    /// Separa o pai (campos escalares) das duas listas de filhos.
    pub fn into_parts(
        self,
        merchandiser_id: i32,
    ) -> (NewVisite, Vec<ReleveStockCreate>, Vec<LigneCommandeCreate>) {
        let visite = NewVisite {
            merchandiser_id,
            client_id: self.client_id,
            date_visite: self.date_visite,
            heure_arrivee: self.heure_arrivee,
            heure_depart: self.heure_depart,
            observations_generales: self.observations_generales,
        };
        (visite, self.releves_stock, self.lignes_commande)
    }
}

// Aceita `"releves_stock": null` como lista vazia
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_child_lists_become_empty() {
        let payload: VisiteCreate = serde_json::from_value(json!({
            "client_id": 3,
            "releves_stock": null
        }))
        .unwrap();

        assert!(payload.releves_stock.is_empty());
        assert!(payload.lignes_commande.is_empty());
        assert!(payload.validate_all().is_ok());
    }

    #[test]
    fn departure_before_arrival_is_rejected() {
        let payload: VisiteCreate = serde_json::from_value(json!({
            "client_id": 3,
            "heure_arrivee": "10:00:00",
            "heure_depart": "09:30:00"
        }))
        .unwrap();

        let errors = payload.validate_all().unwrap_err();
        assert!(errors.field_errors().contains_key("heure_depart"));
    }

    #[test]
    fn negative_quantities_are_rejected() {
        let payload: VisiteCreate = serde_json::from_value(json!({
            "client_id": 3,
            "releves_stock": [{"produit_id": 1, "quantite_en_stock": -2}],
            "lignes_commande": [{"produit_id": 1, "quantite_commandee": 0}]
        }))
        .unwrap();

        assert!(payload.validate_all().is_err());
    }

    #[test]
    fn into_parts_keeps_child_order() {
        let payload: VisiteCreate = serde_json::from_value(json!({
            "client_id": 7,
            "observations_generales": "Rayon bien tenu",
            "lignes_commande": [
                {"produit_id": 2, "quantite_commandee": 4},
                {"produit_id": 1, "quantite_commandee": 9}
            ]
        }))
        .unwrap();

        let (visite, releves, lignes) = payload.into_parts(42);
        assert_eq!(visite.merchandiser_id, 42);
        assert_eq!(visite.client_id, 7);
        assert!(releves.is_empty());
        assert_eq!(lignes.iter().map(|l| l.produit_id).collect::<Vec<_>>(), vec![2, 1]);
    }
}
