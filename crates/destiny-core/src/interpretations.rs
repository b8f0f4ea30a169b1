//! Interpretation corpus: static texts keyed by `number_<N>`.
//!
//! The built-in corpus covers 1–9 and the master numbers. A TOML file can
//! replace it wholesale at startup:
//!
//! ```toml
//! [numbers]
//! number_1 = "..."
//! number_11 = "..."
//! ```
//!
//! Lookups never fail: a missing key reads as an empty string.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Semantic slot an interpretation is attached to in a result. Declaration
/// order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationKey {
    PersonalNumber,
    DestinyNumber,
    SoulNumber,
    PersonalityNumber,
    LifePath,
    Expression,
    MatrixCenter,
}

impl InterpretationKey {
    pub const ALL: [InterpretationKey; 7] = [
        Self::PersonalNumber,
        Self::DestinyNumber,
        Self::SoulNumber,
        Self::PersonalityNumber,
        Self::LifePath,
        Self::Expression,
        Self::MatrixCenter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalNumber => "personal_number",
            Self::DestinyNumber => "destiny_number",
            Self::SoulNumber => "soul_number",
            Self::PersonalityNumber => "personality_number",
            Self::LifePath => "life_path",
            Self::Expression => "expression",
            Self::MatrixCenter => "matrix_center",
        }
    }

    /// `personal_number` -> `Personal Number`.
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Interpretations attached to one result, in report order.
pub type Interpretations = BTreeMap<InterpretationKey, String>;

/// Corpus key for a number.
pub fn number_key(n: u32) -> String {
    format!("number_{n}")
}

/// Read-only text corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationCorpus {
    #[serde(default)]
    numbers: HashMap<String, String>,
}

static BUILTIN: Lazy<InterpretationCorpus> = Lazy::new(|| InterpretationCorpus {
    numbers: BUILTIN_TEXTS
        .iter()
        .map(|(n, text)| (number_key(*n), (*text).to_string()))
        .collect(),
});

impl InterpretationCorpus {
    /// Shared built-in corpus.
    pub fn builtin() -> &'static InterpretationCorpus {
        &BUILTIN
    }

    /// Parse a corpus from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load a corpus file. Keys the file leaves out read as empty.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::CorpusIo {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_toml_str(&content).map_err(|source| CoreError::CorpusParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            entries = corpus.len(),
            "interpretation corpus loaded"
        );
        Ok(corpus)
    }

    /// Text for a raw corpus key, empty when absent.
    pub fn get(&self, key: &str) -> &str {
        self.numbers.get(key).map(String::as_str).unwrap_or("")
    }

    /// Text for a number, looked up as `number_<n>`.
    pub fn for_number(&self, n: u32) -> &str {
        self.get(&number_key(n))
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

const BUILTIN_TEXTS: [(u32, &str); 11] = [
    (
        1,
        "Единица — число лидера и первопроходца. Её носитель стремится к самостоятельности, \
         умеет начинать новое и вести за собой других. Сильные стороны: воля, решительность, \
         инициатива, смелость в принятии решений. Зона роста: нетерпимость к чужому мнению, \
         упрямство и склонность всё делать в одиночку.",
    ),
    (
        2,
        "Двойка — число партнёрства и дипломатии. Человек с этим числом чуток к настроению \
         окружающих, умеет слушать, сглаживать конфликты и находить компромисс. Сильные стороны: \
         такт, терпение, способность к сотрудничеству. Зона роста: зависимость от чужой оценки, \
         нерешительность и страх остаться одному.",
    ),
    (
        3,
        "Тройка — число творчества и самовыражения. Её носитель общителен, оптимистичен, \
         легко заражает других идеями и вдохновением. Сильные стороны: воображение, красноречие, \
         чувство юмора, артистизм. Зона роста: разбросанность, поверхностность и привычка \
         бросать начатое на полпути.",
    ),
    (
        4,
        "Четвёрка — число порядка и надёжности. Человек с этим числом строит жизнь основательно, \
         ценит дисциплину, труд и ясные правила. Сильные стороны: практичность, выносливость, \
         верность слову. Зона роста: консерватизм, излишняя строгость к себе и другим, \
         сопротивление переменам.",
    ),
    (
        5,
        "Пятёрка — число свободы и перемен. Её носитель любознателен, подвижен, легко \
         приспосабливается к новым обстоятельствам и тянется к путешествиям и опыту. Сильные \
         стороны: гибкость, находчивость, смелость. Зона роста: непостоянство, импульсивность \
         и трудности с долгосрочными обязательствами.",
    ),
    (
        6,
        "Шестёрка — число заботы и ответственности. Человек с этим числом ориентирован на семью, \
         дом и близких, стремится к гармонии и красоте. Сильные стороны: доброта, преданность, \
         готовность помочь. Зона роста: гиперопека, жертвенность и желание контролировать \
         жизнь тех, кого любишь.",
    ),
    (
        7,
        "Семёрка — число мудрости и внутреннего поиска. Её носитель склонен к анализу, \
         размышлениям и духовным практикам, ценит уединение и глубину. Сильные стороны: \
         интуиция, наблюдательность, интеллект. Зона роста: замкнутость, недоверие к людям \
         и уход от реальности в мир идей.",
    ),
    (
        8,
        "Восьмёрка — число силы и материального успеха. Человек с этим числом нацелен на \
         результат, умеет управлять ресурсами и людьми, добивается признания. Сильные стороны: \
         деловая хватка, амбициозность, организованность. Зона роста: властность, \
         трудоголизм и оценка всего через деньги.",
    ),
    (
        9,
        "Девятка — число завершения и служения. Её носитель обладает широким взглядом на мир, \
         состраданием и стремлением помогать другим. Сильные стороны: великодушие, \
         идеализм, творческий дар. Зона роста: рассеянность, обидчивость и неумение \
         отпускать прошлое.",
    ),
    (
        11,
        "Одиннадцать — мастер-число интуиции и вдохновения. Человек с этим числом тонко \
         чувствует мир, способен вдохновлять и вести других через личный пример. Сильные \
         стороны: прозорливость, духовная сила, харизма. Зона роста: нервное напряжение, \
         завышенные ожидания к себе и склонность к крайностям.",
    ),
    (
        22,
        "Двадцать два — мастер-число созидателя. Его носитель способен воплощать большие \
         замыслы в реальность и строить то, что переживёт его самого. Сильные стороны: \
         масштаб мышления, практичность, выдержка. Зона роста: груз ответственности, \
         страх не оправдать собственный потенциал.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_reduced_values() {
        let corpus = InterpretationCorpus::builtin();
        for n in (1..=9).chain([11, 22]) {
            assert!(!corpus.for_number(n).is_empty(), "number_{n}");
        }
        assert_eq!(corpus.len(), 11);
    }

    #[test]
    fn missing_key_is_empty() {
        let corpus = InterpretationCorpus::builtin();
        assert_eq!(corpus.for_number(0), "");
        assert_eq!(corpus.for_number(10), "");
        assert_eq!(corpus.get("nonsense"), "");
    }

    #[test]
    fn key_format() {
        assert_eq!(number_key(7), "number_7");
        assert_eq!(number_key(22), "number_22");
    }

    #[test]
    fn toml_corpus_subset() {
        let corpus = InterpretationCorpus::from_toml_str(
            r#"
            [numbers]
            number_1 = "one"
            number_22 = "twenty-two"
            "#,
        )
        .unwrap();
        assert_eq!(corpus.for_number(1), "one");
        assert_eq!(corpus.for_number(22), "twenty-two");
        assert_eq!(corpus.for_number(2), "");
    }

    #[test]
    fn titles() {
        assert_eq!(InterpretationKey::PersonalNumber.title(), "Personal Number");
        assert_eq!(InterpretationKey::LifePath.title(), "Life Path");
        assert_eq!(InterpretationKey::MatrixCenter.title(), "Matrix Center");
    }

    #[test]
    fn key_order_is_report_order() {
        let mut keys = InterpretationKey::ALL.to_vec();
        keys.sort();
        assert_eq!(keys, InterpretationKey::ALL.to_vec());
    }
}
