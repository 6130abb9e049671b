//! Agreement record types.
//!
//! - [`Convenio`] - A collective labor agreement as stored remotely
//! - [`Ambito`] / [`Estado`] - Closed vocabularies for scope and status
//! - [`DatosConvenio`] - Typed view of the structured payload column

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ConvenioId;

/// Geographic/organizational applicability tier of an agreement.
///
/// Wire values match what the store holds, accent included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ambito {
    #[serde(rename = "nacional")]
    Nacional,
    #[serde(rename = "autonómico")]
    Autonomico,
    #[serde(rename = "provincial")]
    Provincial,
    #[serde(rename = "empresa")]
    Empresa,
}

impl Ambito {
    /// The wire value for this scope level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nacional => "nacional",
            Self::Autonomico => "autonómico",
            Self::Provincial => "provincial",
            Self::Empresa => "empresa",
        }
    }
}

/// Lifecycle status of an agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estado {
    Vigente,
    Derogado,
    Prorrogado,
}

impl Estado {
    /// The wire value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vigente => "vigente",
            Self::Derogado => "derogado",
            Self::Prorrogado => "prorrogado",
        }
    }
}

/// One row of an agreement's salary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablaSalarialRow {
    pub categoria: String,
    pub salario_base: Decimal,
    pub plus_convenio: Decimal,
    pub total_anual: Decimal,
}

/// Typed view of the structured payload attached to an agreement.
///
/// The store holds this as a free-form JSON column; only the named fields are
/// read here and unknown keys are ignored at the deserialization boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatosConvenio {
    /// Annual working hours.
    #[serde(default)]
    pub jornada_anual: Option<u32>,
    /// Vacation days per year.
    #[serde(default)]
    pub vacaciones_dias: Option<u32>,
    /// Probation period in days.
    #[serde(default)]
    pub periodo_prueba_dias: Option<u32>,
    /// Maximum duration of temporary contracts, in months.
    #[serde(default)]
    pub contratos_temporales_max_meses: Option<u32>,
    /// Salary table, one row per professional category.
    #[serde(default)]
    pub tablas_salariales: Vec<TablaSalarialRow>,
}

/// A collective labor agreement record.
///
/// Owned by the remote store and immutable from this layer: the core only ever
/// reads `convenios_colectivos` rows. Optional columns stay optional here so a
/// sparse row never fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Convenio {
    pub id: ConvenioId,
    pub nombre: String,
    pub codigo: Option<String>,
    pub ambito: Ambito,
    pub sector: Option<String>,
    pub fecha_publicacion: Option<NaiveDate>,
    pub fecha_vigencia_inicio: Option<NaiveDate>,
    pub fecha_vigencia_fin: Option<NaiveDate>,
    pub boletin_oficial: Option<String>,
    pub estado: Estado,
    pub contenido: Option<String>,
    pub datos_completos: Option<DatosConvenio>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn ambito_wire_values_round_trip() {
        for ambito in [
            Ambito::Nacional,
            Ambito::Autonomico,
            Ambito::Provincial,
            Ambito::Empresa,
        ] {
            let json = serde_json::to_string(&ambito).unwrap();
            assert_eq!(json, format!("\"{}\"", ambito.as_str()));
            let back: Ambito = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ambito);
        }
    }

    #[test]
    fn ambito_autonomico_keeps_accent() {
        let ambito: Ambito = serde_json::from_str("\"autonómico\"").unwrap();
        assert_eq!(ambito, Ambito::Autonomico);
    }

    #[test]
    fn estado_wire_values_are_lowercase() {
        assert_eq!(serde_json::to_string(&Estado::Vigente).unwrap(), "\"vigente\"");
        let back: Estado = serde_json::from_str("\"prorrogado\"").unwrap();
        assert_eq!(back, Estado::Prorrogado);
    }

    #[test]
    fn unknown_estado_fails_decode() {
        assert!(serde_json::from_str::<Estado>("\"pendiente\"").is_err());
    }

    #[test]
    fn datos_completos_ignores_unknown_keys() {
        let datos: DatosConvenio = serde_json::from_str(
            r#"{
                "jornada_anual": 1780,
                "vacaciones_dias": 23,
                "legacy_field": {"nested": true}
            }"#,
        )
        .unwrap();
        assert_eq!(datos.jornada_anual, Some(1780));
        assert_eq!(datos.vacaciones_dias, Some(23));
        assert_eq!(datos.periodo_prueba_dias, None);
        assert!(datos.tablas_salariales.is_empty());
    }

    #[test]
    fn convenio_decodes_sparse_row() {
        let row: Convenio = serde_json::from_str(
            r#"{
                "id": "c1",
                "nombre": "Convenio del Metal",
                "codigo": null,
                "ambito": "provincial",
                "sector": null,
                "fecha_publicacion": null,
                "fecha_vigencia_inicio": null,
                "fecha_vigencia_fin": null,
                "boletin_oficial": null,
                "estado": "vigente",
                "contenido": null,
                "datos_completos": null,
                "created_at": "2024-03-01T10:00:00Z",
                "updated_at": "2024-03-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(row.id.as_str(), "c1");
        assert_eq!(row.ambito, Ambito::Provincial);
        assert!(row.datos_completos.is_none());
    }

    #[test]
    fn salary_table_decodes_decimal_amounts() {
        let datos: DatosConvenio = serde_json::from_str(
            r#"{
                "tablas_salariales": [
                    {
                        "categoria": "Oficial de primera",
                        "salario_base": "1450.50",
                        "plus_convenio": "210.00",
                        "total_anual": "23247.00"
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(datos.tablas_salariales.len(), 1);
        let row = &datos.tablas_salariales[0];
        assert_eq!(row.categoria, "Oficial de primera");
        assert_eq!(row.salario_base, dec!(1450.50));
        assert_eq!(row.total_anual, dec!(23247.00));
    }
}
