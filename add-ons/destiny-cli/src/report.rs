//! Plain-text rendering of a calculation.
//!
//! The layout is fixed: header, base numbers, key numbers with excerpts,
//! grid, karmic numbers, full interpretations, optional augmentation, footer.

use chrono::DateTime;
use destiny_core::{DestinyMatrix, InterpretationKey, MatrixInput, MatrixResult};
use destiny_ledger::{CalculationRow, Client};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const CENTER_EXCERPT_CHARS: usize = 300;
const SUMMARY_EXCERPT_CHARS: usize = 500;
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// Externally supplied text appended to a report. Nothing in this crate
/// produces it; callers that gather extra material hand it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Augmentation {
    pub summary: String,
    pub detailed_info: String,
}

/// First `max` characters (not bytes).
fn excerpt(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Report with the default excerpt length.
pub fn render_text_report(
    input: &MatrixInput,
    result: &MatrixResult,
    extra: Option<&Augmentation>,
) -> String {
    ReportWriter::default().render(input, result, extra)
}

/// The 3x3 grid alone, center in brackets.
pub fn render_grid(matrix: &DestinyMatrix) -> String {
    let mut out = String::new();
    for (i, row) in matrix.rows().iter().enumerate() {
        if i > 0 {
            out.push_str("      ─────┼─────┼─────\n");
        }
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(j, n)| {
                if i == 1 && j == 1 {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        out.push_str(&format!("        {}\n", cells.join("  |  ")));
    }
    out
}

#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    pub excerpt_chars: usize,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl ReportWriter {
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    fn text<'a>(result: &'a MatrixResult, key: InterpretationKey) -> &'a str {
        result.interpretations.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn render(
        &self,
        input: &MatrixInput,
        result: &MatrixResult,
        extra: Option<&Augmentation>,
    ) -> String {
        let mut out = String::new();
        out.push_str("╔════════════════════════════════════════╗\n");
        out.push_str("║     ЛИЧНАЯ МАТРИЦА СУДЬБЫ              ║\n");
        out.push_str("╚════════════════════════════════════════╝\n\n");
        out.push_str(&format!("👤 КЛИЕНТ: {}\n", input.name));
        out.push_str(&format!(
            "📅 ДАТА РОЖДЕНИЯ: {}\n",
            input.birth_date.format("%d.%m.%Y")
        ));
        if let Some(gender) = input.gender {
            out.push_str(&format!("⚧ ПОЛ: {}\n", gender.label_ru()));
        }

        out.push_str(&format!("\n{RULE}\n\n📊 ОСНОВНЫЕ ЧИСЛА:\n\n"));
        out.push_str(&format!("• День рождения: {}\n", result.day));
        out.push_str(&format!("• Месяц рождения: {}\n", result.month));
        out.push_str(&format!(
            "• Год рождения: {} (редуцировано: {})\n",
            result.year, result.year_reduced
        ));

        out.push_str(&format!("\n{RULE}\n\n🔢 КЛЮЧЕВЫЕ ЧИСЛА:\n"));
        let key_numbers = [
            ("Личное число", result.personal_number, InterpretationKey::PersonalNumber),
            ("Число судьбы", result.destiny_number, InterpretationKey::DestinyNumber),
            ("Число души", result.soul_number, InterpretationKey::SoulNumber),
            (
                "Число личности",
                result.personality_number,
                InterpretationKey::PersonalityNumber,
            ),
            ("Путь жизни", result.life_path, InterpretationKey::LifePath),
            ("Выражение", result.expression, InterpretationKey::Expression),
        ];
        for (label, value, key) in key_numbers {
            out.push_str(&format!(
                "\n• {label}: {value}\n  {}...\n",
                excerpt(Self::text(result, key), self.excerpt_chars)
            ));
        }

        out.push_str(&format!("\n{RULE}\n\n🎯 МАТРИЦА СУДЬБЫ:\n\n"));
        out.push_str(&render_grid(&result.matrix));
        out.push_str(&format!(
            "\nЦентр матрицы (Число судьбы): {}\n{}...\n",
            result.matrix.center,
            excerpt(
                Self::text(result, InterpretationKey::MatrixCenter),
                CENTER_EXCERPT_CHARS
            )
        ));

        let karmic = if result.karmic_numbers.is_empty() {
            "Не обнаружено".to_string()
        } else {
            result
                .karmic_numbers
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!("\n{RULE}\n\n⚠️ КАРМИЧЕСКИЕ ЧИСЛА: {karmic}\n"));

        out.push_str(&format!("\n{RULE}\n\n📖 ПОЛНЫЕ ИНТЕРПРЕТАЦИИ:\n"));
        for (key, text) in &result.interpretations {
            let text = text.trim();
            if !text.is_empty() {
                out.push_str(&format!("\n{}:\n{text}\n", key.title()));
            }
        }

        if let Some(extra) = extra {
            if !extra.summary.is_empty() {
                out.push_str(&format!("\n{RULE}\n📚 КРАТКОЕ РЕЗЮМЕ ИЗ ИСТОЧНИКОВ:\n\n"));
                out.push_str(&format!(
                    "{}...\n",
                    excerpt(&extra.summary, SUMMARY_EXCERPT_CHARS)
                ));
            }
            if !extra.detailed_info.is_empty() {
                out.push_str(&extra.detailed_info);
            }
        }

        out.push_str(&format!("\n{RULE}\n✨ Отчет сгенерирован автоматически\n"));
        out
    }
}

fn format_ms(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// One line per client, for `client list`.
pub fn render_client_line(client: &Client) -> String {
    format!(
        "{}  {}  {}",
        client.id,
        client.birth_date.format("%d.%m.%Y"),
        client.name
    )
}

/// Client card plus the number of stored calculations.
pub fn render_client(client: &Client, calculations: u64) -> String {
    let mut out = format!("ID: {}\nИмя: {}\n", client.id, client.name);
    out.push_str(&format!(
        "Дата рождения: {}\n",
        client.birth_date.format("%d.%m.%Y")
    ));
    if let Some(gender) = client.gender {
        out.push_str(&format!("Пол: {}\n", gender.label_ru()));
    }
    let optional = [
        ("Телефон", &client.phone),
        ("Email", &client.email),
        ("Заметки", &client.notes),
        ("Внешний ID", &client.external_ref),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }
    out.push_str(&format!("Создан: {}\n", format_ms(client.created_at_ms)));
    out.push_str(&format!("Расчетов: {calculations}\n"));
    out
}

/// Calculation history, oldest first.
pub fn render_history(rows: &[CalculationRow]) -> String {
    if rows.is_empty() {
        return "История расчетов пуста\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let r = &row.result;
        out.push_str(&format!(
            "{}  {}  судьба {}  центр {}  путь {}",
            format_ms(row.created_at_ms),
            row.id,
            r.destiny_number,
            r.matrix.center,
            r.life_path
        ));
        if !r.karmic_numbers.is_empty() {
            let karmic: Vec<String> = r.karmic_numbers.iter().map(u32::to_string).collect();
            out.push_str(&format!("  кармические {}", karmic.join(",")));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use destiny_core::{Gender, InterpretationCorpus, MatrixCalculator};
    use std::sync::Arc;

    fn fixture() -> (MatrixInput, MatrixResult) {
        let input = MatrixInput::new(
            "ИВАН ИВАНОВ",
            NaiveDate::from_ymd_opt(1990, 3, 15).unwrap(),
            Some(Gender::Male),
        );
        let result = MatrixCalculator::new().calculate(&input);
        (input, result)
    }

    #[test]
    fn excerpt_counts_chars() {
        assert_eq!(excerpt("абвгд", 3), "абв");
        assert_eq!(excerpt("аб", 3), "аб");
        assert_eq!(excerpt("", 3), "");
    }

    #[test]
    fn grid_marks_center() {
        let (_, result) = fixture();
        let grid = render_grid(&result.matrix);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].trim(), "6  |  3  |  1");
        assert_eq!(lines[2].trim(), "9  |  [1]  |  3");
        assert_eq!(lines[4].trim(), "11  |  1  |  1");
    }

    #[test]
    fn report_sections() {
        let (input, result) = fixture();
        let report = render_text_report(&input, &result, None);
        assert!(report.contains("👤 КЛИЕНТ: ИВАН ИВАНОВ"));
        assert!(report.contains("📅 ДАТА РОЖДЕНИЯ: 15.03.1990"));
        assert!(report.contains("ПОЛ: Мужской"));
        assert!(report.contains("• Год рождения: 1990 (редуцировано: 1)"));
        assert!(report.contains("• Личное число: 9"));
        assert!(report.contains("• Число души: 11"));
        assert!(report.contains("Центр матрицы (Число судьбы): 1"));
        assert!(report.contains("КАРМИЧЕСКИЕ ЧИСЛА: Не обнаружено"));
        assert!(report.contains("\nMatrix Center:\n"));
        assert!(report.contains("\nPersonal Number:\n"));
        assert!(!report.contains("РЕЗЮМЕ"));
        assert!(report.ends_with("✨ Отчет сгенерирован автоматически\n"));
    }

    #[test]
    fn excerpts_follow_writer_setting() {
        let (input, result) = fixture();
        let personal = &result.interpretations[&InterpretationKey::PersonalNumber];
        let short = ReportWriter::new(5).render(&input, &result, None);
        let head: String = personal.chars().take(5).collect();
        assert!(short.contains(&format!("• Личное число: 9\n  {head}...\n")));
    }

    #[test]
    fn empty_corpus_still_renders() {
        let (input, _) = fixture();
        let calc = MatrixCalculator::with_corpus(Arc::new(InterpretationCorpus::default()));
        let result = calc.calculate(&input);
        let report = render_text_report(&input, &result, None);
        assert!(report.contains("• Выражение: 3\n  ...\n"));
        assert!(!report.contains("Matrix Center:"));
    }

    #[test]
    fn karmic_and_augmentation() {
        let (input, mut result) = fixture();
        result.karmic_numbers = vec![13, 16];
        let extra = Augmentation {
            summary: "я".repeat(600),
            detailed_info: "\nПодробности\n".to_string(),
        };
        let report = render_text_report(&input, &result, Some(&extra));
        assert!(report.contains("КАРМИЧЕСКИЕ ЧИСЛА: 13, 16"));
        assert!(report.contains(&format!("{}...\n", "я".repeat(500))));
        assert!(!report.contains(&"я".repeat(501)));
        assert!(report.contains("Подробности"));
    }

    #[test]
    fn empty_history() {
        assert_eq!(render_history(&[]), "История расчетов пуста\n");
    }
}
