use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{info, warn};

use super::listcol::list_column;
use super::{count, read_rows, text, year, Loader, Synonyms};
use crate::models::{CompanyRecord, VerifiedFlag};

const SYNONYMS: Synonyms = &[&["VERIFIED_PAGE", "VERIFIED"]];

/// A companies-table row before any coercion.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
struct RawCompany {
    company_name: Option<String>,
    website: Option<String>,
    members: Option<String>,
    verified_page: Option<String>,
    posts: Option<String>,
    founded: Option<String>,
    headquarters: Option<String>,
    industry: Option<String>,
    where_they_studied: Option<String>,
    what_they_are_skilled_at: Option<String>,
}

impl RawCompany {
    /// `None` when the row has no company name.
    fn into_record(self) -> Option<CompanyRecord> {
        // Names are matched exactly, so they are kept untrimmed.
        let name = self.company_name.filter(|n| !n.trim().is_empty())?;

        let flag = VerifiedFlag::from_raw(self.verified_page.as_deref());
        if !flag.is_recognized() {
            warn!(company = %name, value = ?flag, "unrecognized verified flag, treating as not verified");
        }

        Some(CompanyRecord {
            member_count: count("MEMBERS", self.members.as_deref()),
            post_count: count("POSTS", self.posts.as_deref()),
            founded_year: year("FOUNDED", self.founded.as_deref()),
            verified: flag.is_verified(),
            // Blank-vs-missing is decided by the classifier; keep the raw text.
            website: self.website,
            headquarters: text(self.headquarters),
            industry: text(self.industry),
            where_they_studied: list_column("WHERE_THEY_STUDIED", self.where_they_studied.as_deref()),
            what_they_are_skilled_at: list_column(
                "WHAT_THEY_ARE_SKILLED_AT",
                self.what_they_are_skilled_at.as_deref(),
            ),
            name,
        })
    }
}

/// Loader for the company-attributes table.
pub struct CompaniesLoader;

impl CompaniesLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Loader for CompaniesLoader {
    type Record = CompanyRecord;

    fn load(&self, path: &Path) -> Result<Vec<CompanyRecord>> {
        let rows: Vec<RawCompany> = read_rows(path, SYNONYMS)?;
        let total = rows.len();
        let companies: Vec<CompanyRecord> =
            rows.into_iter().filter_map(RawCompany::into_record).collect();

        if companies.len() < total {
            warn!(
                path = %path.display(),
                skipped = total - companies.len(),
                "skipped company rows without a name"
            );
        }
        info!(path = %path.display(), companies = companies.len(), "loaded companies");
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_companies() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            "COMPANY_NAME,WEBSITE,MEMBERS,VERIFIED_PAGE,POSTS,FOUNDED,INDUSTRY,WHERE_THEY_STUDIED"
        )
        .unwrap();
        writeln!(
            f,
            r#"Acme,acme.com,"1,204",Yes,31,1998.0,Accounting,"['1,712 University of Washington']""#
        )
        .unwrap();
        writeln!(f, "Foo,,5,no,1,,,").unwrap();
        writeln!(f, "Bar,bar.io,3,False,50,,,").unwrap();
        writeln!(f, ",orphan.com,1,,,,,").unwrap();
        writeln!(f, "Odd,odd.net,1,Certified,1,,,").unwrap();

        let companies = CompaniesLoader::new().load(f.path()).unwrap();
        assert_eq!(companies.len(), 4);

        let acme = &companies[0];
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.member_count, Some(1204));
        assert!(acme.verified);
        assert_eq!(acme.founded_year, Some(1998));
        assert_eq!(acme.where_they_studied, vec!["1,712 University of Washington"]);

        let foo = &companies[1];
        assert_eq!(foo.website, None);
        assert!(!foo.verified);
        assert_eq!(foo.post_count, Some(1));

        assert!(!companies[2].verified);
        // Unrecognized flag text is not verified
        assert!(!companies[3].verified);
    }
}
