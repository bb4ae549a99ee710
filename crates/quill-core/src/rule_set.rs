use std::fmt;
use std::str::FromStr;

/// Category of a linting rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Correctness: documentation that is outright wrong
    Corr,
    /// Suspicious: documentation that is most likely wrong
    Susp,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Corr => "CORR",
            Self::Susp => "SUSP",
        }
    }

    pub const ALL: &'static [Category] = &[Category::Corr, Category::Susp];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CORR" => Ok(Self::Corr),
            "SUSP" => Ok(Self::Susp),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultStatus {
    #[default]
    Enabled,
    Disabled,
}

macro_rules! declare_rules {
    (
        $(
            $variant:ident => {
                name: $name:literal,
                categories: [$($category:ident),+ $(,)?],
                default: $default:ident,
            }
        ),* $(,)?
    ) => {
        /// Enum representing all available linting rules
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Rule {
            $($variant),*
        }

        impl Rule {
            /// Get the rule's string name
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),*
                }
            }

            /// Get the rule's categories
            pub const fn categories(self) -> &'static [Category] {
                match self {
                    $(Self::$variant => &[$(Category::$category),+]),*
                }
            }

            /// Get the rule's default status
            pub const fn default_status(self) -> DefaultStatus {
                match self {
                    $(Self::$variant => DefaultStatus::$default),*
                }
            }

            /// Check if the rule is enabled by default
            pub const fn is_enabled_by_default(self) -> bool {
                matches!(self.default_status(), DefaultStatus::Enabled)
            }

            /// Check if the rule belongs to a specific category
            pub fn has_category(self, category: Category) -> bool {
                self.categories().contains(&category)
            }

            /// Parse a rule from its string name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for Rule {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        /// Static array containing all rules
        pub const ALL_RULES: &[Rule] = &[
            $(Rule::$variant),*
        ];
    };
}

// Declare all rules with their metadata
declare_rules! {
    RequireReturnsCheck => {
        name: "require_returns_check",
        categories: [Corr, Susp],
        default: Enabled,
    },
}

/// A collection of rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Check if the rule set contains a specific rule
    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    /// Get the number of rules in the set
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the rule set is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self { rules: iter.into_iter().collect() }
    }
}

impl<'a> FromIterator<&'a Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = &'a Rule>>(iter: I) -> Self {
        Self { rules: iter.into_iter().copied().collect() }
    }
}

impl Rule {
    /// Get all rules in a specific category
    pub fn by_category(category: Category) -> impl Iterator<Item = Rule> {
        ALL_RULES
            .iter()
            .copied()
            .filter(move |r| r.has_category(category))
    }

    /// Get all rules enabled by default
    pub fn enabled_by_default() -> impl Iterator<Item = Rule> {
        ALL_RULES
            .iter()
            .copied()
            .filter(|r| r.is_enabled_by_default())
    }
}
