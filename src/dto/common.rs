//! Tipos comunes de la API
//!
//! Respuesta genérica de mutación: además de success/message/data lleva el
//! destino de navegación (`<colección>?success=<mensaje>`) que el panel usa
//! para redirigir después de una mutación exitosa.

use serde::Serialize;

/// Construir el destino de navegación con el mensaje de éxito como query param
pub fn success_redirect(collection_path: &str, message: &str) -> String {
    format!("{}?success={}", collection_path, urlencoding::encode(message))
}

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
            redirect: None,
        }
    }

    /// Mutación exitosa con navegación hacia la página de colección
    pub fn success_with_redirect(data: T, message: &str, collection_path: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
            redirect: Some(success_redirect(collection_path, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_redirect_encodes_message() {
        let redirect = success_redirect("/vehicles", "Kendaraan berhasil ditambahkan");
        assert_eq!(
            redirect,
            "/vehicles?success=Kendaraan%20berhasil%20ditambahkan"
        );
    }

    #[test]
    fn test_success_with_redirect_carries_message_and_target() {
        let response = ApiResponse::success_with_redirect(
            (),
            "Suku cadang berhasil dihapus",
            "/spare-parts",
        );
        assert!(response.success);
        assert_eq!(
            response.message.as_deref(),
            Some("Suku cadang berhasil dihapus")
        );
        assert_eq!(
            response.redirect.as_deref(),
            Some("/spare-parts?success=Suku%20cadang%20berhasil%20dihapus")
        );
    }
}
