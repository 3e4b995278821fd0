//! Local reply generation for when the assistant proxy cannot answer.
//! A user turn always gets a reply, never an error bubble.

use rand::Rng;

/// Checked in order; the first key contained in the lowercased text
/// wins.
const KEYWORD_RESPONSES: &[(&str, &str)] = &[
    ("hola", "¡Hola! Me alegra verte. ¿Cómo estás hoy?"),
    (
        "buenos días",
        "¡Buenos días! Espero que tengas un excelente día. ¿En qué puedo ayudarte?",
    ),
    ("buenas tardes", "¡Buenas tardes! ¿Cómo va tu día?"),
    (
        "buenas noches",
        "¡Buenas noches! ¿Listo para aprender algo nuevo?",
    ),
    (
        "ayuda",
        "Usa los botones del menú principal para navegar o escribe \"ayuda\" para ver las \
         instrucciones completas.",
    ),
    (
        "temas",
        "Usa el botón \"📚 Temas del Curso\" en el menú principal para explorar todos los temas \
         disponibles.",
    ),
    (
        "ejercicios",
        "Usa el botón \"🧠 Ejercicios Prácticos\" en el menú principal para ver todos los \
         ejercicios disponibles.",
    ),
    (
        "adiós",
        "¡Hasta luego! Ha sido un placer ayudarte. ¡Que tengas un excelente día!",
    ),
    (
        "gracias",
        "¡De nada! Me alegra haber podido ayudarte. ¿Hay algo más en lo que pueda asistirte?",
    ),
    ("chao", "¡Chao! Espero verte pronto. ¡Sigue aprendiendo!"),
];

/// When nothing matched, admit the hiccup and point at what still
/// works locally.
const DEFAULT_RESPONSES: &[&str] = &[
    "Tengo un problema temporal para consultar al asistente. Mientras tanto puedes explorar \
     \"📚 Temas del Curso\" desde el menú o reintentar tu pregunta en unos segundos.",
    "No pude obtener una respuesta en este momento. Prueba los \"🧠 Ejercicios Prácticos\" del \
     menú principal o vuelve a enviar tu pregunta enseguida.",
    "El asistente no está disponible ahora mismo. Puedes consultar el \"📖 Glosario\" o \
     intentar tu pregunta de nuevo en un momento.",
    "Hubo un problema temporal de conexión. Revisa las \"💬 Preguntas Frecuentes\" del menú o \
     reintenta en unos segundos.",
];

/// Deterministic keyword lookup first, then a random temporary-issue
/// notice.
pub fn reply_for(text: &str) -> String {
    let lowered = text.to_lowercase();
    for (keyword, response) in KEYWORD_RESPONSES {
        if lowered.contains(keyword) {
            return (*response).to_string();
        }
    }

    let index = rand::thread_rng().gen_range(0..DEFAULT_RESPONSES.len());
    DEFAULT_RESPONSES[index].to_string()
}
