use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Number layout used when rendering amounts for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatProfile {
    pub locale: &'static str,
    pub symbol: &'static str,
    pub grouping: &'static str,
    pub decimal: &'static str,
    position: SymbolPosition,
}

/// Display currency. Only changes how amounts are printed; stored amounts
/// carry no currency and are never converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            _ => None,
        }
    }

    pub fn all() -> &'static [Currency] {
        &[Self::Usd, Self::Eur, Self::Gbp]
    }

    /// The next currency in selector order, wrapping around.
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn profile(&self) -> FormatProfile {
        match self {
            Self::Usd => FormatProfile {
                locale: "en_US",
                symbol: "$",
                grouping: ",",
                decimal: ".",
                position: SymbolPosition::Prefix,
            },
            Self::Eur => FormatProfile {
                locale: "de_DE",
                symbol: "€",
                grouping: ".",
                decimal: ",",
                position: SymbolPosition::Suffix,
            },
            Self::Gbp => FormatProfile {
                locale: "en_GB",
                symbol: "£",
                grouping: ",",
                decimal: ".",
                position: SymbolPosition::Prefix,
            },
        }
    }

    /// Format an amount with grouping and two decimal places.
    /// e.g. `1234.5` → `"$1,234.50"` (USD) or `"1.234,50 €"` (EUR)
    pub fn format(&self, amount: Decimal) -> String {
        let profile = self.profile();
        let rounded = amount.round_dp(2);
        let abs = rounded.abs();
        let formatted = format!("{abs:.2}");
        let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

        let grouped: String = int_part
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(profile.grouping);
        let number = format!("{grouped}{}{dec_part}", profile.decimal);

        let body = match profile.position {
            SymbolPosition::Prefix => format!("{}{number}", profile.symbol),
            SymbolPosition::Suffix => format!("{number} {}", profile.symbol),
        };

        if rounded < Decimal::ZERO {
            format!("-{body}")
        } else {
            body
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
