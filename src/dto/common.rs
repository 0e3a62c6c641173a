use serde::{Deserialize, Serialize};

/// Tamaño de página para dashboard y listado de colaboradores
pub const PAGE_SIZE: i64 = 10;

// Respuesta estándar de la API
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Respuesta sin datos, solo el aviso para el usuario
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Parámetros `?page=&q=` de los listados
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub q: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Metadatos de paginación
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, total: i64) -> Self {
        let total_pages = if total == 0 { 1 } else { (total + PAGE_SIZE - 1) / PAGE_SIZE };
        Self {
            page,
            per_page: PAGE_SIZE,
            total,
            total_pages,
        }
    }
}

/// Descripción de un formulario para los GET que en la web mostraban HTML
#[derive(Debug, Serialize)]
pub struct FormDescription {
    pub action: String,
    pub fields: Vec<&'static str>,
    /// Campos que se envían repetidos, una vez por elemento
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repeated_fields: Vec<&'static str>,
}

impl FormDescription {
    pub fn new(action: impl Into<String>, fields: Vec<&'static str>) -> Self {
        Self {
            action: action.into(),
            fields,
            repeated_fields: Vec::new(),
        }
    }
}
