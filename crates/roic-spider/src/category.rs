use crate::table::TableSelectors;
use crate::Error;
use std::fmt;
use std::str::FromStr;

/// The roic.ai pages a table can live on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Summary,
    Financials,
    Ratios,
}

impl Page {
    /// Path below the ticker's base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Page::Summary => "",
            Page::Financials => "/financials",
            Page::Ratios => "/ratios",
        }
    }
}

/// One of the roic.ai tables; each is cached in its own file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Summary,
    IncomeStatement,
    BalanceSheet,
    CashFlow,
    Profitability,
    Credit,
    Liquidity,
    WorkingCapital,
    EnterpriseValue,
    Multiples,
    PerShareData,
}

// Layout of roic.ai; every selector the scraper uses derives from these roots.
const SUMMARY_ROOT: &str = "/html/body/div[1]/div/div[2]/div[1]/div[2]/div/div/table";
const SECTIONS_ROOT: &str = "/html/body/div[1]/div/div[2]/div[3]";

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Summary,
        Category::IncomeStatement,
        Category::BalanceSheet,
        Category::CashFlow,
        Category::Profitability,
        Category::Credit,
        Category::Liquidity,
        Category::WorkingCapital,
        Category::EnterpriseValue,
        Category::Multiples,
        Category::PerShareData,
    ];

    /// The financial statements, in page order.
    pub const STATEMENTS: [Category; 3] = [
        Category::IncomeStatement,
        Category::BalanceSheet,
        Category::CashFlow,
    ];

    /// The ratio tables, in page order.
    pub const RATIOS: [Category; 7] = [
        Category::Profitability,
        Category::Credit,
        Category::Liquidity,
        Category::WorkingCapital,
        Category::EnterpriseValue,
        Category::Multiples,
        Category::PerShareData,
    ];

    /// Name used for the cache file and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Summary => "summary",
            Category::IncomeStatement => "income_statement",
            Category::BalanceSheet => "balance_sheet",
            Category::CashFlow => "cash_flow",
            Category::Profitability => "profitability",
            Category::Credit => "credit",
            Category::Liquidity => "liquidity",
            Category::WorkingCapital => "working_capital",
            Category::EnterpriseValue => "enterprise_value",
            Category::Multiples => "multiples",
            Category::PerShareData => "per_share_data",
        }
    }

    pub fn page(&self) -> Page {
        match self {
            Category::Summary => Page::Summary,
            Category::IncomeStatement | Category::BalanceSheet | Category::CashFlow => {
                Page::Financials
            }
            _ => Page::Ratios,
        }
    }

    /// Position of the table's section on its page (1-based); the summary
    /// table stands alone.
    fn section(&self) -> Option<u32> {
        match self {
            Category::Summary => None,
            Category::IncomeStatement | Category::Profitability => Some(1),
            Category::BalanceSheet | Category::Credit => Some(2),
            Category::CashFlow | Category::Liquidity => Some(3),
            Category::WorkingCapital => Some(4),
            Category::EnterpriseValue => Some(5),
            Category::Multiples => Some(6),
            Category::PerShareData => Some(7),
        }
    }

    /// XPath of the `<table>` element.
    pub fn table_root(&self) -> String {
        match self.section() {
            None => SUMMARY_ROOT.to_string(),
            Some(n) => format!("{SECTIONS_ROOT}/div[{n}]/div/div/div/table"),
        }
    }

    pub fn selectors(&self) -> TableSelectors {
        TableSelectors::under(&self.table_root())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts `cash_flow`, `cash-flow` and `CashFlow` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Category::ALL
            .into_iter()
            .find(|category| category.name().replace('_', "") == wanted)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}
