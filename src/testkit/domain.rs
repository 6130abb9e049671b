//! Builders for domain records used across tests.
//!
//! Provides concise builders for [`Convenio`] and [`Publicacion`] rows so
//! tests focus on assertions rather than construction boilerplate. Every
//! optional field starts empty; timestamps default to a fixed instant so
//! ordering is deterministic unless a test overrides it.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{
    Ambito, Convenio, ConvenioId, DatosConvenio, Estado, Publicacion, PublicacionId,
    TipoPublicacion,
};

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Start building an agreement record.
pub fn convenio(id: &str, nombre: &str) -> ConvenioBuilder {
    ConvenioBuilder {
        record: Convenio {
            id: ConvenioId::from(id),
            nombre: nombre.to_string(),
            codigo: None,
            ambito: Ambito::Nacional,
            sector: None,
            fecha_publicacion: None,
            fecha_vigencia_inicio: None,
            fecha_vigencia_fin: None,
            boletin_oficial: None,
            estado: Estado::Vigente,
            contenido: None,
            datos_completos: None,
            created_at: base_instant(),
            updated_at: base_instant(),
        },
    }
}

/// Builder for [`Convenio`] test records.
pub struct ConvenioBuilder {
    record: Convenio,
}

impl ConvenioBuilder {
    pub fn codigo(mut self, codigo: &str) -> Self {
        self.record.codigo = Some(codigo.to_string());
        self
    }

    pub fn ambito(mut self, ambito: Ambito) -> Self {
        self.record.ambito = ambito;
        self
    }

    pub fn sector(mut self, sector: &str) -> Self {
        self.record.sector = Some(sector.to_string());
        self
    }

    pub fn estado(mut self, estado: Estado) -> Self {
        self.record.estado = estado;
        self
    }

    pub fn vigencia_fin(mut self, fecha: NaiveDate) -> Self {
        self.record.fecha_vigencia_fin = Some(fecha);
        self
    }

    pub fn datos(mut self, datos: DatosConvenio) -> Self {
        self.record.datos_completos = Some(datos);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.record.created_at = at;
        self.record.updated_at = at;
        self
    }

    pub fn build(self) -> Convenio {
        self.record
    }
}

/// Create a publication row for an agreement.
pub fn publicacion(id: &str, convenio_id: &str, fecha: NaiveDate) -> Publicacion {
    Publicacion {
        id: PublicacionId::from(id),
        convenio_id: ConvenioId::from(convenio_id),
        titulo: format!("Publicación {id}"),
        descripcion: None,
        tipo: TipoPublicacion::Actualizacion,
        fecha_publicacion: fecha,
        url: None,
        visto: false,
        created_at: base_instant(),
        updated_at: base_instant(),
    }
}
