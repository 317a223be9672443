//! Prompt templates
//!
//! Both prompts ask for Spanish markdown, matching the Argentine insurance
//! market the tool targets.

/// Builds the prompt that summarizes one company's website text
pub fn summary_prompt(content: &str) -> String {
    format!(
        "Por favor, genera un resumen conciso pero completo del siguiente texto sobre una webpage de seguros de Argentina.
Incluye información clave sobre los productos, servicios, formas de contacto, siniestros y propuestas de valor.
Responde en formato markdown.

TEXTO:
{content}

RESUMEN:
"
    )
}

/// Builds the prompt that compares two company summaries
pub fn comparison_prompt(
    first_name: &str,
    first_summary: &str,
    second_name: &str,
    second_summary: &str,
) -> String {
    format!(
        "Necesito un análisis comparativo detallado entre dos compañías de seguros argentinas: {first_name} y {second_name}.

IMPORTANTE: Este análisis debe basarse EXCLUSIVAMENTE en la información extraída de los sitios web oficiales de ambas compañías. No debes incorporar conocimiento externo sobre estas aseguradoras que no aparezca en los resúmenes proporcionados.

A continuación te proporciono los resúmenes extraídos de sus sitios web:

## {first_name}:
{first_summary}

## {second_name}:
{second_summary}

Por favor, realiza un análisis comparativo completo que incluya:

1. TABLA COMPARATIVA: Crea una tabla markdown comparando ambas compañías en las siguientes categorías:
   - Variedad de productos y coberturas
   - Servicios digitales y app
   - Proceso de siniestros
   - Canales de atención al cliente
   - Propuesta de valor única

2. FORTALEZAS Y DEBILIDADES: Analiza las principales fortalezas y debilidades de cada compañía respecto a su competidora.

3. RECOMENDACIONES: En qué casos conviene elegir una u otra compañía según:
   - Perfil del cliente (particular, empresa, profesional)
   - Tipo de cobertura necesitada
   - Preferencias de servicio (digital vs tradicional)

4. CONCLUSIONES: Síntesis final de la comparativa con los puntos más relevantes.

5. LIMITACIONES DEL ANÁLISIS: Incluye un párrafo explicando que este análisis está limitado a la información disponible en los sitios web oficiales, y puede no reflejar la experiencia real de los clientes o todas las características y coberturas de cada compañía.

Responde en formato markdown bien estructurado, usando tablas, negritas, y listas para facilitar la lectura.
Sé objetivo y equilibrado en tu análisis, basándote ESTRICTAMENTE en la información proporcionada en los resúmenes extraídos de los sitios web.
"
    )
}
