//! Synthetic contract generation.
//!
//! Each contract gets randomised commercial terms and an independently drawn
//! tone per section, and is rendered to
//! `{out}/{Company_Name}/{TYPE}_{Company_Name}.pdf`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clausewise_core::{ContractRecord, ContractType, Tone};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::render::{Block, DocumentBuilder};
use crate::templates::{self, fill};
use crate::GenerateError;
use crate::names::{self, pick};

/// How many contracts to generate and where.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    pub companies: usize,
    pub min_contracts: usize,
    pub max_contracts: usize,
    /// Effective date printed on every contract.
    pub date: NaiveDate,
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.companies == 0 {
            return Err(GenerateError::Config("number of companies must be at least 1".into()));
        }
        if self.min_contracts > self.max_contracts {
            return Err(GenerateError::Config(format!(
                "minimum contracts ({}) exceeds maximum ({})",
                self.min_contracts, self.max_contracts
            )));
        }
        Ok(())
    }
}

/// Folder-safe form of a company name: spaces become underscores.
pub fn folder_name(company: &str) -> String {
    company.replace(' ', "_")
}

/// Renders contracts with a caller-supplied RNG.
///
/// Remembers every path written so that a second contract of the same type
/// for the same company gets a numbered file instead of overwriting the first.
pub struct ContractGenerator<R> {
    rng: R,
    written: HashSet<PathBuf>,
}

impl<R: Rng> ContractGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            written: HashSet::new(),
        }
    }

    /// Generate a whole batch: one shared counterparty, `companies` companies,
    /// each with a random number of contracts in `min..=max`.
    pub fn generate_batch(&mut self, opts: &GenerateOptions) -> Result<Vec<ContractRecord>, GenerateError> {
        opts.validate()?;

        let counterparty = names::company(&mut self.rng);
        info!(%counterparty, "counterparty for all contracts");

        let mut contracts = Vec::new();
        for _ in 0..opts.companies {
            let company = names::company(&mut self.rng);
            let count = self.rng.gen_range(opts.min_contracts..=opts.max_contracts);
            for _ in 0..count {
                let contract_type = *ContractType::ALL
                    .choose(&mut self.rng)
                    .unwrap_or(&ContractType::Msa);
                let record =
                    self.generate_contract(&opts.out_dir, &company, &counterparty, contract_type, opts.date)?;
                contracts.push(record);
            }
        }
        Ok(contracts)
    }

    /// Render one contract and return its record.
    pub fn generate_contract(
        &mut self,
        out_dir: &Path,
        company: &str,
        counterparty: &str,
        contract_type: ContractType,
        date: NaiveDate,
    ) -> Result<ContractRecord, GenerateError> {
        let folder = out_dir.join(folder_name(company));
        std::fs::create_dir_all(&folder).map_err(|source| GenerateError::Io {
            path: folder.clone(),
            source,
        })?;
        let path = self.claim_path(&folder, contract_type, company);

        let record = ContractRecord {
            company: company.to_string(),
            contract_type,
            counterparty: counterparty.to_string(),
            jurisdiction: pick(&mut self.rng, templates::JURISDICTIONS).to_string(),
            currency: pick(&mut self.rng, templates::CURRENCIES).to_string(),
            effective_date: date.format("%B %d, %Y").to_string(),
            liability_amount: self.rng.gen_range(5000..=20000),
            archive_years: self.rng.gen_range(2..=5),
            payment_days: *templates::PAYMENT_DAYS.choose(&mut self.rng).unwrap_or(&30),
            dispute_method: pick(&mut self.rng, templates::DISPUTE_METHODS).to_string(),
            tones: contract_type
                .sections()
                .iter()
                .map(|&s| (s, *Tone::ALL.choose(&mut self.rng).unwrap_or(&Tone::Neutral)))
                .collect(),
            path: path.clone(),
        };

        let doc = self.compose(&record);
        doc.save(&path)?;
        info!(
            path = %path.display(),
            tones = ?record.tones.iter().map(|(s, t)| format!("{}={}", s.key(), t)).collect::<Vec<_>>(),
            "contract generated"
        );
        Ok(record)
    }

    fn claim_path(&mut self, folder: &Path, contract_type: ContractType, company: &str) -> PathBuf {
        let stem = format!("{}_{}", contract_type.as_str(), folder_name(company));
        let mut path = folder.join(format!("{stem}.pdf"));
        let mut n = 2;
        while self.written.contains(&path) {
            path = folder.join(format!("{stem}_{n}.pdf"));
            n += 1;
        }
        self.written.insert(path.clone());
        path
    }

    fn compose(&mut self, record: &ContractRecord) -> DocumentBuilder {
        let values = [
            ("date", record.effective_date.clone()),
            ("company", record.company.clone()),
            ("counterparty", record.counterparty.clone()),
            ("services", templates::SERVICES.to_string()),
            ("days", record.payment_days.to_string()),
            ("amount", record.liability_amount.to_string()),
            ("currency", record.currency.clone()),
            ("years", record.archive_years.to_string()),
            ("jurisdiction", record.jurisdiction.clone()),
            ("method", record.dispute_method.clone()),
        ];

        let mut doc = DocumentBuilder::new();
        doc.push(Block::Title(format!("{} - {}", record.contract_type, record.company)))
            .push(Block::Paragraph(format!("Counterparty: {}", record.counterparty)))
            .push(Block::Paragraph(format!("Effective Date: {}", record.effective_date)))
            .push(Block::Spacer(18));

        for (n, &(section, tone)) in record.tones.iter().enumerate() {
            let template = pick(&mut self.rng, templates::variants(section, tone));
            doc.push(Block::Heading(format!("{}. {}", n + 1, section.title())))
                .push(Block::Paragraph(fill(template, &values)))
                .push(Block::Spacer(14));
        }

        doc.push(Block::PageBreak)
            .push(Block::Heading("Signatures".into()))
            .push(Block::Paragraph(
                "IN WITNESS WHEREOF, the Parties have executed this Agreement.".into(),
            ));
        for party in [&record.company, &record.counterparty] {
            doc.push(Block::Spacer(22))
                .push(Block::Subheading(party.clone()))
                .push(Block::Paragraph(names::person(&mut self.rng)))
                .push(Block::Paragraph(names::job(&mut self.rng).to_string()));
        }
        doc
    }
}
