//! Pattern tables used by the line classifier and the task-label inference
//!
//! Every table is an ordered list of named matchers. Order is priority:
//! lookups report the first rule that matches. Tables that mention a person
//! are templates with a `{name}` placeholder and are compiled per
//! configuration; the rest are compiled once.

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;

/// A named, compiled matcher
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub regex: Regex,
}

/// An ordered collection of rules
#[derive(Debug, Clone)]
pub struct RuleTable {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Compile a table from `(rule name, pattern)` pairs
    pub fn compile(name: &'static str, specs: &[(&'static str, &str)]) -> Result<Self, regex::Error> {
        let rules = specs
            .iter()
            .map(|&(rule, pattern)| Regex::new(pattern).map(|regex| Rule { name: rule, regex }))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { name, rules })
    }

    /// Compile a template table, substituting `{name}` with an escaped name
    pub fn compile_for(
        name: &'static str,
        templates: &[(&'static str, &str)],
        person: &str,
    ) -> Result<Self, regex::Error> {
        let escaped = regex::escape(&person.trim().to_lowercase());
        let specs: Vec<(&'static str, String)> = templates
            .iter()
            .map(|(rule, template)| (*rule, template.replace("{name}", &escaped)))
            .collect();
        let borrowed: Vec<(&'static str, &str)> =
            specs.iter().map(|(rule, p)| (*rule, p.as_str())).collect();
        Self::compile(name, &borrowed)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[cfg(test)]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule matching `text`
    pub fn first_match(&self, text: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.regex.is_match(text))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }
}

/// Someone else asks the tracked person to do something.
pub const DIRECT_ASSIGNMENT: &[(&str, &str)] = &[
    (
        "name_can_you",
        r"{name}[,:]?\s+(?:você\s+)?(?:pode|poderia|consegue)\s+(?:fazer|preparar|enviar|criar|desenvolver)",
    ),
    (
        "name_must",
        r"{name}[,:]?\s+(?:você\s+)?(?:precisa|deve|tem que|vai ter que)\s+(?:fazer|preparar|enviar|criar)",
    ),
    ("ask_for_name", r"(?:pede|peço|pediu)\s+(?:pro|para(?:\s+o)?)\s+{name}"),
    ("name_responsible", r"{name}\s+(?:fica|vai ficar)\s+responsável"),
    (
        "name_imperative",
        r"{name}[,:]?\s+(?:faz|faça|prepare|envie|crie|desenvolva)",
    ),
    (
        "can_you",
        r"(?:tem como|consegue|poderia|pode)\s+(?:você\s+)?(?:enviar|mandar|fazer|preparar|criar)",
    ),
    (
        "do_it_for_us",
        r"(?:você\s+)?(?:envia|manda|faz|prepara|cria).*(?:pra|para)\s+(?:mim|gente|nós)",
    ),
];

/// Speaker label belongs to a person.
pub const SPEAKER: &[(&str, &str)] = &[("speaker", r"\b{name}\b")];

/// Phrases the tracked person uses to accept a task.
pub const SELF_CONFIRMATION_PATTERNS: &[(&str, &str)] = &[
    (
        "ok_will_do",
        r"(?:ok|certo|sim|beleza)[,.]?\s+(?:vou|eu vou)\s+(?:fazer|preparar|enviar|criar|mandar)",
    ),
    (
        "will_do",
        r"(?:vou|eu vou)\s+(?:fazer|preparar|enviar|criar|desenvolver|mandar)",
    ),
    ("can_do", r"posso\s+fazer"),
    ("sure_do", r"faço\s+sim"),
    (
        "send_soon",
        r"(?:te|vou)\s+(?:mandar|enviar|passar).*(?:hoje|amanhã|agora)",
    ),
    ("send_today", r"(?:mando|envio)\s+(?:ainda\s+)?(?:hoje|amanhã)"),
];

/// The tracked person volunteers something nobody asked for.
pub const SELF_COMMITMENT_PATTERNS: &[(&str, &str)] = &[
    (
        "will_send",
        r"(?:vou|eu vou)\s+(?:te\s+)?(?:passar|enviar|mandar|fazer|preparar|criar|desenvolver)",
    ),
    ("can_send", r"(?:posso|pode)\s+(?:te\s+)?(?:enviar|mandar|passar|fazer)"),
    (
        "day_then_will",
        r"(?:segunda|terça|quarta|quinta|sexta|sábado|domingo|hoje|amanhã).*(?:vou|eu vou|te passo|te envio|te mando)",
    ),
    (
        "will_send_on_day",
        r"(?:vou|eu vou)\s+(?:te\s+)?(?:passar|enviar|mandar).*(?:segunda|terça|quarta|quinta|sexta|sábado|domingo|hoje|amanhã)",
    ),
    (
        "so_on_day",
        r"(?:então|então,)\s+(?:segunda|terça|quarta|quinta|sexta|sábado|domingo).*(?:vou|eu vou|te passo|te envio)",
    ),
    (
        "day_then_send",
        r"(?:segunda|terça|quarta|quinta|sexta|sábado|domingo).*(?:eu\s+)?(?:te passo|te envio|te mando)",
    ),
    ("will_book", r"(?:vou|eu vou)\s+marcar"),
    ("will_put", r"(?:vou|eu vou)\s+colocar"),
    ("agreed_will", r"(?:combinado|ok|beleza|tá bom).*(?:vou|eu vou)"),
    ("can_send_you", r"posso\s+te\s+enviar"),
    ("will_pass_you", r"vou\s+te\s+passar"),
];

/// The counterpart promises to close, present, send or get back.
pub const COUNTERPART_COMMITMENT_PATTERNS: &[(&str, &str)] = &[
    (
        "will_close",
        r"(?:vou|eu vou)\s+(?:fechar|apresentar|enviar|mandar|retornar|voltar)",
    ),
    (
        "need_to_close",
        r"(?:preciso|precisamos)\s+(?:fechar|apresentar|enviar|retornar|voltar)",
    ),
    ("close_this_week", r"\bfechar\b.*\bsemana\b"),
    ("present_first_week", r"\bapresentar\b.*\bprimeira semana\b"),
    ("by_day", r"\baté\b\s+(?:o\s+)?dia\s+\d{1,2}"),
];

/// Future-tense or hypothetical speech; overrides any positive match.
pub const EXCLUSION_PATTERNS: &[(&str, &str)] = &[
    (
        "it_will_be",
        r"vai\s+(?:ser|estar|ficar|aparecer|trazer|mostrar|enxergar)",
    ),
    (
        "you_will_like",
        r"(?:vou|você vai)\s+(?:adorar|gostar|amar|ver|notar|entender|perceber)",
    ),
    ("can_be", r"pode\s+(?:ser|estar|fazer|ter)"),
    ("has_to", r"tem\s+(?:que|como|os|as|isso|essa|esse)"),
    ("will_have", r"vai\s+(?:dar|ter|aparecer)"),
    ("we_go", r"(?:eu|a gente)\s+vai"),
    ("we_will", r"(?:eu|a gente)\s+(?:vou|vamos)"),
    ("you_already", r"você\s+(?:já|não|tem)"),
    ("its_fine", r"tá\s+(?:bom|bem|legal|perfeito)"),
    ("will_need", r"vai\s+(?:precisar|poder|conseguir)"),
];

/// Talk about product capabilities rather than work to be done.
pub const PRODUCT_DESCRIPTION_PATTERNS: &[(&str, &str)] = &[
    ("management_of", r"\bgestão de\b"),
    ("integration", r"\bintegra(?:ção|)\b"),
    ("module", r"\bmódulo(?:s)?\b"),
    ("i_can_build", r"\bposso\b\s+(?:fazer|criar|colocar|avaliar|emitir)"),
    ("we_do", r"\bfaz(?:emos|)\b"),
    ("it_can", r"\bconsegue\b\s+(?:fazer|emitir|assistir)"),
    ("projects_tasks", r"\bprojeto(?:s)?\b.*\btarefa(?:s)?\b"),
    ("certificate", r"\bcertificado(?:s)?\b"),
    ("report", r"\brelatório(?:s)?\b"),
];

/// "<product> ... tem": someone describing what a product has.
pub const PRODUCT_HAS_TEMPLATE: &str = r"\b{name}\b.*\btem\b";

/// Verbs that mark a line as real work.
pub const ACTION_VERBS: &[&str] = &[
    "enviar",
    "mandar",
    "passar",
    "marcar",
    "agendar",
    "fechar",
    "aprovar",
    "apresentar",
    "retornar",
    "retorno",
    "voltar",
    "começar",
    "iniciar",
    "implementar",
];

/// Keyword groups mapped to a concrete task label, in priority order.
pub const TASK_LABELS: &[(&[&str], &str)] = &[
    (&["proposta", "orçamento"], "Enviar proposta comercial"),
    (
        &["marcar", "agendar", "agenda"],
        "Marcar retorno/follow-up na agenda",
    ),
    (&["implementação", "implementar"], "Iniciar implementação"),
    (
        &["retorno", "voltar a falar", "follow-up"],
        "Fazer retorno/follow-up",
    ),
    (&["enviar", "mandar", "passar"], "Enviar documento/informação"),
];

/// Weekday names in lookup order.
pub const WEEKDAYS: &[(&str, Weekday)] = &[
    ("segunda", Weekday::Mon),
    ("segunda-feira", Weekday::Mon),
    ("terça", Weekday::Tue),
    ("terca", Weekday::Tue),
    ("terça-feira", Weekday::Tue),
    ("terca-feira", Weekday::Tue),
    ("quarta", Weekday::Wed),
    ("quarta-feira", Weekday::Wed),
    ("quinta", Weekday::Thu),
    ("quinta-feira", Weekday::Thu),
    ("sexta", Weekday::Fri),
    ("sexta-feira", Weekday::Fri),
    ("sábado", Weekday::Sat),
    ("sabado", Weekday::Sat),
    ("domingo", Weekday::Sun),
];

/// Month names, including the unaccented "marco".
pub const MONTHS: &[(&str, u32)] = &[
    ("janeiro", 1),
    ("fevereiro", 2),
    ("março", 3),
    ("marco", 3),
    ("abril", 4),
    ("maio", 5),
    ("junho", 6),
    ("julho", 7),
    ("agosto", 8),
    ("setembro", 9),
    ("outubro", 10),
    ("novembro", 11),
    ("dezembro", 12),
];

pub static SELF_CONFIRMATION: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::compile("self_confirmation", SELF_CONFIRMATION_PATTERNS)
        .expect("valid self confirmation patterns")
});

pub static SELF_COMMITMENT: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::compile("self_commitment", SELF_COMMITMENT_PATTERNS)
        .expect("valid self commitment patterns")
});

pub static COUNTERPART_COMMITMENT: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::compile("counterpart_commitment", COUNTERPART_COMMITMENT_PATTERNS)
        .expect("valid counterpart commitment patterns")
});

pub static EXCLUSION: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::compile("exclusion", EXCLUSION_PATTERNS).expect("valid exclusion patterns")
});

pub static PRODUCT_DESCRIPTION: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::compile("product_description", PRODUCT_DESCRIPTION_PATTERNS)
        .expect("valid product description patterns")
});

pub static ACTION_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", ACTION_VERBS.join("|"))).expect("valid action verb regex")
});

/// Month number for a lowercase month name
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, number)| *number)
}

/// Concrete label for a commitment, from keywords in the line and its context
pub fn infer_specific_task(line: &str, context: &[String]) -> Option<&'static str> {
    let text = format!("{} {}", line, context.join(" ")).to_lowercase();
    TASK_LABELS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, label)| *label)
}
