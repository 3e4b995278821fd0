//! Canned course content: menus, topic and exercise sheets, quiz,
//! glossary and FAQ. All user-facing text is Spanish.

use crate::message::{ExerciseKey, Menu, MenuChoice, MenuItem, Reply, TopicKey};

pub fn welcome_sequence() -> Vec<Reply> {
    let mut replies = vec![Reply::text(
        "¡Hola! 👋 Bienvenido al Chatbot Educativo de Inteligencia Artificial.\n\nSoy tu \
         asistente virtual y estaré aquí para acompañarte durante todo el curso de IA \
         profesional.",
    )
    .with_audio()];
    replies.extend(instruction_messages());
    replies.push(
        Reply::text("Para comenzar, por favor proporciona tu nombre y apellido:").needs_input(),
    );
    replies
}

/// Replay of the welcome instructions, reachable from the main menu.
pub fn instructions_sequence() -> Vec<Reply> {
    let mut replies = instruction_messages();
    replies.push(Reply::with_menu(
        "🚀 **¡LISTO PARA COMENZAR!**\n\n¿En qué puedo ayudarte hoy? ¡Estoy aquí para hacer tu \
         aprendizaje más fácil y divertido!",
        back_menu(),
    ));
    replies
}

fn instruction_messages() -> Vec<Reply> {
    vec![
        Reply::text(
            "📝 **INSTRUCCIONES DE ESCRITURA**\n\nPuedes escribir cualquier pregunta en el campo \
             de texto y presionar Enter o hacer clic en el botón enviar.",
        ),
        Reply::text(
            "❓ **TIPOS DE PREGUNTAS**\n\nPuedes preguntarme sobre:\n• Temas del curso (IA, \
             machine learning, deep learning)\n• Explicaciones de conceptos\n• Ejercicios \
             prácticos\n• Dudas específicas sobre el contenido",
        ),
        Reply::text(
            "⌨️ **COMANDOS ESPECIALES**\n\n• \"ayuda\" - Para ver estas instrucciones nuevamente\n• \
             \"temas\" - Para ver los temas disponibles\n• \"ejercicios\" - Para solicitar \
             ejercicios prácticos",
        ),
        Reply::text(
            "🎧 **INFORMACIÓN SOBRE AUDIO**\n\nEl chatbot reproduce audio automáticamente en el \
             mensaje de bienvenida y puedes enviar notas de voz con el micrófono.",
        ),
        Reply::text(
            "📊 **HISTORIAL DE CONVERSACIONES**\n\nTodas las conversaciones se guardan durante la \
             sesión para tu seguimiento.",
        ),
    ]
}

pub fn name_rejected() -> Reply {
    Reply::text("⚠️ Por favor proporciona tu nombre y apellido completos.").needs_input()
}

pub fn name_accepted(name: &str) -> Reply {
    Reply::text(format!(
        "¡Excelente, {}! 👏\n\nTu identidad ha sido registrada correctamente.",
        name
    ))
}

pub fn main_menu(user_name: Option<&str>) -> Reply {
    let text = match user_name {
        Some(name) => format!(
            "¡Perfecto, {}! 🎯\n\nAquí tienes el menú principal. Puedes navegar por las \
             diferentes secciones:",
            name
        ),
        None => "Aquí tienes el menú principal. Puedes navegar por las diferentes secciones:"
            .to_string(),
    };

    Reply::with_menu(
        text,
        Menu::new(vec![
            MenuItem::new("🎵 Bienvenida e Instrucciones", MenuChoice::Instructions),
            MenuItem::new("📚 Temas del Curso", MenuChoice::Topics),
            MenuItem::new("🧠 Ejercicios Prácticos", MenuChoice::Exercises),
            MenuItem::new("📖 Glosario", MenuChoice::Glossary),
            MenuItem::new("🧩 Autoevaluación", MenuChoice::Quiz),
            MenuItem::new("💬 Preguntas Frecuentes", MenuChoice::Faq),
            MenuItem::new("❓ Ayuda", MenuChoice::Help),
        ]),
    )
}

pub fn topics_menu() -> Reply {
    Reply::with_menu(
        "📚 **TEMAS DISPONIBLES**\n\nSelecciona el tema que te interesa:",
        Menu::new(vec![
            MenuItem::new("🤖 Fundamentos de IA", MenuChoice::Topic(TopicKey::Fundamentos)),
            MenuItem::new(
                "📊 Machine Learning",
                MenuChoice::Topic(TopicKey::MachineLearning),
            ),
            MenuItem::new("🧠 Deep Learning", MenuChoice::Topic(TopicKey::DeepLearning)),
            MenuItem::new(
                "🎯 Aplicaciones Prácticas",
                MenuChoice::Topic(TopicKey::Aplicaciones),
            ),
        ]),
    )
}

pub fn topic(key: TopicKey) -> Reply {
    let (title, body) = match key {
        TopicKey::Fundamentos => (
            "🤖 Fundamentos de IA",
            "• ¿Qué es la inteligencia artificial?\n• Historia y evolución de la IA\n• Tipos de \
             inteligencia artificial\n• Aplicaciones básicas de IA",
        ),
        TopicKey::MachineLearning => (
            "📊 Machine Learning",
            "• Conceptos básicos de ML\n• Algoritmos de aprendizaje supervisado\n• Algoritmos de \
             aprendizaje no supervisado\n• Evaluación de modelos",
        ),
        TopicKey::DeepLearning => (
            "🧠 Deep Learning",
            "• Redes neuronales artificiales\n• Redes neuronales convolucionales (CNN)\n• Redes \
             neuronales recurrentes (RNN)\n• Frameworks populares",
        ),
        TopicKey::Aplicaciones => (
            "🎯 Aplicaciones Prácticas",
            "• Procesamiento de lenguaje natural\n• Visión por computadora\n• Sistemas de \
             recomendación\n• Chatbots y asistentes virtuales",
        ),
    };

    Reply::with_menu(format!("**{}**\n\n{}", title, body), back_menu())
}

pub fn exercises_menu() -> Reply {
    Reply::with_menu(
        "🧠 **EJERCICIOS DISPONIBLES**\n\nSelecciona el nivel de dificultad:",
        Menu::new(vec![
            MenuItem::new(
                "🔰 Ejercicios Básicos",
                MenuChoice::ExerciseLevel(ExerciseKey::Basicos),
            ),
            MenuItem::new(
                "⚡ Ejercicios Intermedios",
                MenuChoice::ExerciseLevel(ExerciseKey::Intermedios),
            ),
            MenuItem::new(
                "🚀 Proyectos Prácticos",
                MenuChoice::ExerciseLevel(ExerciseKey::Proyectos),
            ),
            MenuItem::new(
                "🏆 Desafíos Avanzados",
                MenuChoice::ExerciseLevel(ExerciseKey::Desafios),
            ),
        ]),
    )
}

pub fn exercise_level(key: ExerciseKey) -> Reply {
    let (title, body) = match key {
        ExerciseKey::Basicos => (
            "🔰 Ejercicios Básicos",
            "• Implementar un algoritmo de clasificación simple\n• Crear un modelo de regresión \
             lineal\n• Análisis exploratorio de datos\n• Visualización de datos básica",
        ),
        ExerciseKey::Intermedios => (
            "⚡ Ejercicios Intermedios",
            "• Construir una red neuronal básica\n• Implementar un sistema de recomendación\n• \
             Procesamiento de texto con NLP\n• Optimización de hiperparámetros",
        ),
        ExerciseKey::Proyectos => (
            "🚀 Proyectos Prácticos",
            "• Clasificador de imágenes\n• Sistema de análisis de sentimientos\n• Chatbot \
             simple\n• Sistema de recomendación completo",
        ),
        ExerciseKey::Desafios => (
            "🏆 Desafíos Avanzados",
            "• Optimización de hiperparámetros\n• Implementación de algoritmos complejos\n• \
             Análisis de datos en tiempo real\n• Modelos de ensemble",
        ),
    };

    Reply::with_menu(format!("**{}**\n\n{}", title, body), back_menu())
}

pub fn help_sequence() -> Vec<Reply> {
    vec![
        Reply::text(
            "❓ **AYUDA Y SOPORTE**\n\nAquí tienes las instrucciones de uso completas:",
        ),
        Reply::text(
            "📝 **ESCRIBIR MENSAJES**\n\nEscribe cualquier pregunta y presiona Enter o haz clic \
             en enviar.",
        ),
        Reply::text(
            "🎯 **TIPOS DE PREGUNTAS**\n\nPuedes preguntarme sobre:\n• Temas del curso (IA, \
             machine learning, deep learning)\n• Explicaciones de conceptos\n• Ejercicios \
             prácticos\n• Dudas específicas sobre el contenido",
        ),
        Reply::text(
            "🎧 **AUDIO**\n\nEl chatbot reproduce audio automáticamente solo en el mensaje de \
             bienvenida.",
        ),
        Reply::with_menu(
            "📊 **HISTORIAL**\n\nTodas las conversaciones se guardan durante la sesión.",
            back_menu(),
        ),
    ]
}

const GLOSSARY_TERMS: &[(&str, &str)] = &[
    (
        "Inteligencia Artificial",
        "Disciplina que estudia cómo construir sistemas capaces de realizar tareas que \
         requieren inteligencia humana.",
    ),
    (
        "Machine Learning",
        "Rama de la IA en la que los modelos aprenden patrones a partir de datos en lugar de \
         reglas programadas a mano.",
    ),
    (
        "Deep Learning",
        "Familia de técnicas de ML basada en redes neuronales con muchas capas.",
    ),
    (
        "Red neuronal",
        "Modelo computacional inspirado en el cerebro, compuesto por capas de unidades que \
         transforman la entrada paso a paso.",
    ),
    (
        "Dataset",
        "Colección de ejemplos con la que se entrena o evalúa un modelo.",
    ),
    (
        "Overfitting",
        "Cuando un modelo memoriza los datos de entrenamiento y pierde capacidad de \
         generalizar a datos nuevos.",
    ),
    (
        "NLP",
        "Procesamiento de lenguaje natural: técnicas para que las máquinas entiendan y \
         generen texto.",
    ),
];

pub fn glossary_reply() -> Reply {
    Reply::with_menu(
        "📖 **GLOSARIO DEL CURSO**\n\nHe abierto el glosario en el panel lateral. También puedes \
         preguntarme por cualquier término directamente.",
        back_menu(),
    )
}

/// Body for the glossary side panel.
pub fn glossary_sheet() -> String {
    let mut sheet = String::from("📖 Glosario del curso\n");
    for (term, definition) in GLOSSARY_TERMS {
        sheet.push_str(&format!("\n**{}**\n{}\n", term, definition));
    }
    sheet
}

struct QuizQuestion {
    prompt: &'static str,
    options: [&'static str; 3],
    correct: usize,
}

const QUIZ: &[QuizQuestion] = &[
    QuizQuestion {
        prompt: "¿Cuál de estas opciones describe mejor el machine learning?",
        options: [
            "Programar reglas fijas a mano",
            "Aprender patrones a partir de datos",
            "Copiar respuestas de internet",
        ],
        correct: 1,
    },
    QuizQuestion {
        prompt: "¿Qué tipo de red se usa habitualmente para clasificar imágenes?",
        options: [
            "Red neuronal convolucional (CNN)",
            "Tabla hash",
            "Árbol binario de búsqueda",
        ],
        correct: 0,
    },
    QuizQuestion {
        prompt: "¿Qué indica el overfitting de un modelo?",
        options: [
            "Que el modelo generaliza muy bien",
            "Que faltan datos de entrenamiento",
            "Que el modelo memorizó el entrenamiento y falla con datos nuevos",
        ],
        correct: 2,
    },
];

pub fn quiz_question(index: usize) -> Option<Reply> {
    let question = QUIZ.get(index)?;
    let mut items: Vec<MenuItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| MenuItem::new(*option, MenuChoice::QuizAnswer(i)))
        .collect();
    items.push(MenuItem::new("⬅️ Menú Principal", MenuChoice::MainMenu));

    Some(Reply::with_menu(
        format!(
            "🧩 **AUTOEVALUACIÓN {}/{}**\n\n{}",
            index + 1,
            QUIZ.len(),
            question.prompt
        ),
        Menu::new(items),
    ))
}

pub fn quiz_feedback(index: usize, chosen: usize) -> Reply {
    let Some(question) = QUIZ.get(index) else {
        return Reply::with_menu("Esa pregunta ya no está activa.", back_menu());
    };

    let text = if chosen == question.correct {
        "✅ ¡Correcto! Muy bien.".to_string()
    } else {
        format!(
            "❌ No exactamente. La respuesta correcta era:\n\n{}",
            question.options[question.correct]
        )
    };

    let next_item = if index + 1 < QUIZ.len() {
        MenuItem::new("➡️ Siguiente pregunta", MenuChoice::QuizNext)
    } else {
        MenuItem::new("🏁 Terminar", MenuChoice::QuizNext)
    };

    Reply::with_menu(
        text,
        Menu::new(vec![
            next_item,
            MenuItem::new("⬅️ Menú Principal", MenuChoice::MainMenu),
        ]),
    )
}

pub fn quiz_finished() -> Reply {
    Reply::with_menu(
        "🎉 ¡Has completado la autoevaluación! Puedes repetirla cuando quieras desde el menú.",
        back_menu(),
    )
}

const FAQ_ENTRIES: &[(&str, &str)] = &[
    (
        "¿Cómo navego por el curso?",
        "Usa los botones del menú principal: temas, ejercicios, glosario y autoevaluación. \
         Siempre puedes volver con \"⬅️ Menú Principal\".",
    ),
    (
        "¿Se guarda mi conversación?",
        "El historial vive durante la sesión actual del navegador. Al cerrar la página se \
         reinicia.",
    ),
    (
        "¿Puedo enviar notas de voz?",
        "Sí, mantén pulsado el botón del micrófono para grabar y suéltalo para enviar.",
    ),
    (
        "¿Qué pasa si el asistente no responde?",
        "A veces la conexión falla; el chatbot responde con sugerencias locales y puedes \
         reintentar tu pregunta en unos segundos.",
    ),
];

pub fn faq_menu() -> Reply {
    let mut items: Vec<MenuItem> = FAQ_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (question, _))| MenuItem::new(*question, MenuChoice::FaqEntry(i)))
        .collect();
    items.push(MenuItem::new("⬅️ Menú Principal", MenuChoice::MainMenu));

    Reply::with_menu(
        "💬 **PREGUNTAS FRECUENTES**\n\nElige una pregunta:",
        Menu::new(items),
    )
}

pub fn faq_answer(index: usize) -> Reply {
    match FAQ_ENTRIES.get(index) {
        Some((question, answer)) => Reply::with_menu(
            format!("**{}**\n\n{}", question, answer),
            Menu::new(vec![
                MenuItem::new("💬 Otras preguntas", MenuChoice::Faq),
                MenuItem::new("⬅️ Menú Principal", MenuChoice::MainMenu),
            ]),
        ),
        None => faq_menu(),
    }
}

pub fn back_menu() -> Menu {
    Menu::new(vec![MenuItem::new(
        "⬅️ Menú Principal",
        MenuChoice::MainMenu,
    )])
}

/// Notice shown instead of an error when a voice note cannot be sent.
pub fn voice_upload_failed() -> Reply {
    Reply::text(
        "🎤 No pude enviar tu nota de voz en este momento. Puedes intentarlo de nuevo o \
         escribir tu pregunta.",
    )
}
