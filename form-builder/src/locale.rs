//! User-facing strings (es).

pub use crate::NO_ANSWER;

pub const APP_TITLE: &str = "Generador de Formularios Dinámicos";
pub const ADD_NEW_QUESTION: &str = "Agregar Nueva Pregunta";
pub const PREVIEW_HEADING: &str = "Vista Previa del Formulario";
pub const VALIDATE_FORM: &str = "Validar Formulario";

pub const ADD_QUESTION_TITLE: &str = "Agregar Pregunta";
pub const EDIT_QUESTION_TITLE: &str = "Editar Pregunta";
pub const RESPONSES_TITLE: &str = "Respuestas del Formulario";

pub const QUESTION_TEXT_LABEL: &str = "Texto de la Pregunta";
pub const QUESTION_KIND_LABEL: &str = "Tipo de Respuesta";
pub const REQUIRED_LABEL: &str = "Campo Obligatorio";
pub const OPTIONS_LABEL: &str = "Opciones";
pub const NEW_OPTION_PLACEHOLDER: &str = "Nueva opción";
pub const ADD_OPTION: &str = "Agregar";
pub const SUBMIT_NEW: &str = "Agregar Pregunta";
pub const SUBMIT_EDIT: &str = "Guardar Cambios";
pub const CANCEL: &str = "Cancelar";
pub const FIELD_REQUIRED: &str = "Este campo es obligatorio";

pub const SELECT_PLACEHOLDER: &str = "Seleccione una opción";
pub const DATE_PLACEHOLDER: &str = "AAAA-MM-DD";
pub const SWITCH_ON: &str = "Sí";
pub const SWITCH_OFF: &str = "No";
