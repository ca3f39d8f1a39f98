//! Static copy of the landing page.

pub const TITLE: &str = "AcademicProfessor";

pub const SUBTITLE: &str = "El Futuro del Éxito Estudiantil es Ahora";

pub const TAGLINE: &str =
    "Nuestra IA no solo predice. Revela patrones, identifica riesgos y potencia el talento oculto.";

#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

pub const HERO_LINKS: [Link; 2] = [
    Link {
        label: "Probar la Aplicación",
        url: "https://academ1c.streamlit.app/",
    },
    Link {
        label: "Ver en GitHub",
        url: "https://github.com/eddyacv/IA",
    },
];

pub const PROBLEM_TITLE: &str = "El Desafío: El Riesgo Académico Invisible";

pub const PROBLEM_PARAGRAPHS: [&str; 2] = [
    "Cada año, estudiantes con gran potencial se quedan atrás por factores difíciles de \
     detectar a tiempo. La intervención tardía reduce las oportunidades y malgasta recursos \
     educativos.",
    "Identificar quién necesita ayuda, y cuándo, es el mayor obstáculo para las instituciones \
     modernas. Nuestra solución transforma datos en insights accionables.",
];

pub const RISK_TITLE: &str = "Estudiantes en Riesgo: Difíciles de Detectar";

pub const RISK_CAPTION: &str = "Los puntos rojos representan estudiantes en riesgo académico";

pub const DEMO_TITLE: &str = "Ve la Magia en Acción";

pub const DEMO_LINK: Link = Link {
    label: "Ver la demostración en video",
    url: "https://www.youtube.com/watch?v=75Ul4O66aCQ",
};

pub const FEATURES_TITLE: &str = "Plataforma de Intervención Inteligente";

#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        icon: "◈",
        title: "Predicción Inteligente",
        description: "Modelo XGBoost de alta precisión para anticipar el rendimiento estudiantil \
                      con análisis predictivo avanzado.",
    },
    Feature {
        icon: "⇪",
        title: "Análisis por Lotes",
        description: "Carga archivos Excel con múltiples estudiantes y obtén resultados \
                      detallados en segundos.",
    },
    Feature {
        icon: "✓",
        title: "Predicción Individual",
        description: "Utiliza un formulario interactivo para analizar casos específicos al \
                      instante con precisión.",
    },
    Feature {
        icon: "⚠",
        title: "Categorización de Riesgo",
        description: "Sistema de alertas visuales (rojo, amarillo, verde) para identificar \
                      estudiantes que necesitan apoyo inmediato.",
    },
    Feature {
        icon: "⇩",
        title: "Exportación de Resultados",
        description: "Descarga todos los análisis y predicciones en formato Excel para \
                      análisis posterior.",
    },
    Feature {
        icon: "⚿",
        title: "Acceso Seguro",
        description: "Sistema de autenticación robusto para proteger el acceso a la aplicación \
                      y datos sensibles.",
    },
];

pub const DATASET_TITLE: &str = "El Corazón del Modelo: Nuestro Dataset";

pub const DATASET_SUBTITLE: &str = "Atributos del Dataset";

/// Shape of the mini chart drawn next to a dataset column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    Bar,
    Categorical,
    Line,
    Donut,
}

impl ChartKind {
    pub fn glyphs(self) -> &'static str {
        match self {
            ChartKind::Histogram => "▂▅▇▃",
            ChartKind::Bar => "▇▅▃",
            ChartKind::Categorical => "◆◇◆",
            ChartKind::Line => "╱╲╱",
            ChartKind::Donut => "◔",
        }
    }
}

pub const DATASET_COLUMNS: [(&str, ChartKind); 8] = [
    ("Hours_Studied", ChartKind::Histogram),
    ("Attendance", ChartKind::Bar),
    ("Parental_Involvement", ChartKind::Categorical),
    ("Teacher_Quality", ChartKind::Categorical),
    ("Family_Income", ChartKind::Line),
    ("Internet_Access", ChartKind::Donut),
    ("Previous_Scores", ChartKind::Histogram),
    ("Motivation_Level", ChartKind::Bar),
];

pub const ATTRIBUTES: [(&str, &str); 20] = [
    ("Hours_Studied", "Número de horas dedicadas al estudio por semana."),
    ("Attendance", "Porcentaje de asistencia a clases."),
    ("Parental_Involvement", "Nivel de involucramiento de los padres (Bajo, Medio, Alto)."),
    ("Access_to_Resources", "Disponibilidad de recursos educativos."),
    ("Teacher_Quality", "Calidad percibida del profesorado."),
    ("Family_Income", "Nivel de ingresos familiares."),
    ("Internet_Access", "Disponibilidad de internet para el aprendizaje en línea."),
    ("Study_Environment", "Calidad del ambiente de estudio."),
    ("Extracurricular_Activities", "Participación en actividades extracurriculares."),
    ("Health_Status", "Estado de salud general del estudiante."),
    ("Sleep_Quality", "Calidad del sueño que obtiene el estudiante."),
    ("Peer_Influence", "Influencia del grupo de pares en el rendimiento académico."),
    ("School_Type", "Tipo de centro educativo (Pública, Privada)."),
    ("Travel_Time", "Tiempo de viaje hasta el centro educativo."),
    ("Absences", "Número de ausencias escolares."),
    ("Previous_Scores", "Puntuaciones obtenidas en exámenes previos."),
    ("Motivation_Level", "Nivel de motivación intrínseca del estudiante para aprender."),
    ("Self_Study", "Tiempo dedicado al autoestudio."),
    ("Review_Sessions", "Asistencia a sesiones de repaso."),
    ("Exam_Score", "Puntuación final del examen (variable objetivo)."),
];

pub const TEAM_TITLE: &str = "Conoce a los Desarrolladores";

#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub name: &'static str,
    pub role: &'static str,
}

pub const TEAM: [Member; 5] = [
    Member {
        name: "Acevedo Villena Dylan",
        role: "Desarrollador Principal",
    },
    Member {
        name: "Aguilar Blas Javier",
        role: "Desarrollador",
    },
    Member {
        name: "Guevara Villalobos Gino",
        role: "Desarrollador",
    },
    Member {
        name: "Padilla Rios Orlando",
        role: "Desarrollador",
    },
    Member {
        name: "Palomino Cuenca Jaime",
        role: "Desarrollador",
    },
];

pub const TECH_TITLE: &str = "Construido con Tecnología de Punta";

pub const TECHNOLOGIES: [&str; 6] = [
    "Python",
    "Streamlit",
    "XGBoost",
    "Pandas",
    "Scikit-learn",
    "Joblib",
];

pub const FOOTER_LINK: Link = Link {
    label: "GitHub Repository",
    url: "https://github.com/eddyacv/IA",
};

pub const COPYRIGHT: &str = "© 2025 AcademicProfessor Team. Todos los derechos reservados.";
