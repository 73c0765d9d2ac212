use serde::Serialize;

// Envelope genérico de respuesta: {success, message, data?}
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_message(message: String) -> Self {
        Self {
            success: true,
            message,
            data: None,
        }
    }
}
