/// Balances within this margin of zero are treated as settled; transfers at
/// or below it are rounding dust and never emitted.
pub const SETTLEMENT_TOLERANCE: f64 = 0.01;

/// Display name for expenses whose payer was deleted from the group.
pub const UNKNOWN_PAYER_NAME: &str = "Desconocido";

/// Wire representation of the deleted-payer sentinel.
pub const UNKNOWN_PAYER_ID: &str = "unknown";

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Input format for gathering dates.
pub const GATHERING_DATE_FORMAT: &str = "%d/%m/%Y";

/// Forfeits assigned to the most indebted member ("el Ratón").
pub const CONSEQUENCES: [&str; 10] = [
    "lavar todos los platos de la juntada.",
    "comprar la próxima ronda de bebidas.",
    "ser el DJ de la próxima juntada (sin quejas).",
    "limpiar el asador después de la próxima comida.",
    "contar un chiste malo cada 10 minutos por una hora.",
    "hacer un baile ridículo para todos.",
    "preparar los snacks para la próxima reunión.",
    "ser el chofer designado de la próxima salida.",
    "organizar la próxima juntada (¡todo incluido!).",
    "usar un sombrero ridículo por el resto del día.",
];

/// Column header of the all-groups CSV export.
pub const CSV_HEADER: [&str; 9] = [
    "Grupo",
    "Miembro",
    "Gasto",
    "Monto",
    "Pagador",
    "Participantes",
    "Aporte Individual",
    "Fecha de Creación",
    "Fecha de Juntada",
];
