use serde::{Deserialize, Serialize};

use crate::utils::errors::{invalid_parameter_error, AppError, AppResult};

/// Tamaño fijo de página del listado
pub const PAGE_SIZE: u64 = 10;

/// Query string del listado
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Término de búsqueda no vacío
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Página 1 si no viene; enteros >= 1 en otro caso
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        let number = match raw.map(str::trim).filter(|v| !v.is_empty()) {
            None => 1,
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| invalid_parameter_error("page", value))?,
        };

        Ok(Self { number, size: PAGE_SIZE })
    }

    /// Satura en u64::MAX: una página enorme queda fuera de rango, no desborda
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }

    /// Una página más allá del final es un 404; la página 1 siempre existe
    pub fn ensure_exists(&self, count: u64) -> AppResult<()> {
        if self.number > 1 && self.offset() >= count {
            return Err(AppError::NotFound(format!("Invalid page: {}", self.number)));
        }
        Ok(())
    }

    pub fn has_next(&self, count: u64) -> bool {
        self.offset().saturating_add(self.size) < count
    }
}

/// Envoltura de respuesta paginada
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: T,
}

fn page_link(base_path: &str, page: u64, search: Option<&str>) -> String {
    match search {
        Some(term) => format!("{}?page={}&search={}", base_path, page, urlencoding::encode(term)),
        None => format!("{}?page={}", base_path, page),
    }
}

impl<T> Paginated<T> {
    pub fn new(results: T, count: u64, page: PageRequest, base_path: &str, search: Option<&str>) -> Self {
        let next = page
            .has_next(count)
            .then(|| page_link(base_path, page.number + 1, search));
        let previous = (page.number > 1).then(|| page_link(base_path, page.number - 1, search));

        Self { count, next, previous, results }
    }
}
