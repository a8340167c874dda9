use std::collections::{HashMap, HashSet};

/// Static description of what the command line accepts.
pub struct Registry {
    pub commands: &'static [CommandSpec],
    pub flags: &'static [FlagSpec],
    pub params: &'static [ParamSpec],
}

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub handler: fn(&Args) -> anyhow::Result<()>,
}

pub struct FlagSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Args {
    pub flags: HashSet<String>,
    pub params: HashMap<String, String>,
    pub command: Option<String>,
    pub positionals: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub args: Args,
    pub errors: Vec<ParseError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub token: String,
    pub kind: ParseErrorKind,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnknownToken,
    MissingParamValue,
}

impl Registry {
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|command| command.name == name)
    }

    fn flag(&self, token: &str) -> Option<&FlagSpec> {
        self.flags
            .iter()
            .find(|flag| flag.name == token || flag.aliases.iter().any(|alias| *alias == token))
    }

    fn suggestion_tokens(&self) -> Vec<&'static str> {
        let mut tokens: Vec<&'static str> = Vec::new();
        tokens.extend(self.commands.iter().map(|command| command.name));
        tokens.extend(self.flags.iter().map(|flag| flag.name));
        tokens.extend(self.params.iter().map(|param| param.name));
        tokens
    }
}

impl Args {
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn collect(args: Vec<String>, registry: &Registry) -> ParseOutcome {
        let mut parsed = Args::default();
        let mut errors = Vec::new();
        let suggestion_tokens = registry.suggestion_tokens();

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if let Some(flag) = registry.flag(&arg) {
                parsed.flags.insert(flag.name.to_string());
                continue;
            }

            if registry.params.iter().any(|param| param.name == arg) {
                match iter.next() {
                    Some(value) => {
                        parsed.params.insert(arg, value);
                    }
                    None => errors.push(ParseError {
                        token: arg,
                        kind: ParseErrorKind::MissingParamValue,
                        suggestions: Vec::new(),
                    }),
                }
                continue;
            }

            if parsed.command.is_none() {
                if let Some(command) = registry.command(&arg) {
                    parsed.command = Some(command.name.to_string());
                    continue;
                }
            }

            if arg.starts_with('-') || parsed.command.is_none() {
                let suggestions = suggest(&arg, &suggestion_tokens);
                errors.push(ParseError {
                    token: arg,
                    kind: ParseErrorKind::UnknownToken,
                    suggestions,
                });
                continue;
            }

            parsed.positionals.push(arg);
        }

        ParseOutcome {
            args: parsed,
            errors,
        }
    }
}

fn suggest(token: &str, candidates: &[&'static str]) -> Vec<String> {
    let threshold = if token.len() <= 4 {
        1
    } else if token.len() <= 7 {
        2
    } else {
        3
    };

    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(|candidate| (levenshtein(token, candidate), *candidate))
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    scored
        .into_iter()
        .filter(|(distance, _)| *distance <= threshold)
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_len]
}
