use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Street address resolved from a CEP by the address directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}
