use crate::api::{CatalogRow, Course, FacultyGroup, Page, SubjectGroup};
use crate::error::{CatalogError, Result};
use crate::fetcher::CatalogClient;
use crate::utils::{compare_course_codes, remaining_pages};
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::ProgressBar;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

/// A grouped view of the catalog that page records can be merged into.
pub trait Grouping: Default + fmt::Display {
    type Record: DeserializeOwned;

    fn merge(&mut self, records: Vec<Self::Record>);

    fn course_count(&self) -> usize;

    /// Courses whose display string contains `needle`, ignoring case. Empty
    /// subjects and faculties are dropped.
    fn filtered(&self, needle: &str) -> Self;

    fn sort_courses(&mut self);

    fn rows(&self) -> Vec<CatalogRow<'_>>;
}

/// Faculty -> subject -> display strings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupedCatalog {
    faculties: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl GroupedCatalog {
    pub fn faculty(&self, faculty: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.faculties.get(faculty)
    }

    pub fn courses(&self, faculty: &str, subject: &str) -> Option<&[String]> {
        self.faculty(faculty)?.get(subject).map(Vec::as_slice)
    }

    pub fn faculties(&self) -> impl Iterator<Item = &str> {
        self.faculties.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
        self.faculties
    }
}

impl Grouping for GroupedCatalog {
    type Record = Course;

    fn merge(&mut self, records: Vec<Course>) {
        for course in records {
            self.faculties
                .entry(course.faculty)
                .or_default()
                .entry(course.subject)
                .or_default()
                .push(course.as_string);
        }
    }

    fn course_count(&self) -> usize {
        self.faculties
            .values()
            .flat_map(|subjects| subjects.values())
            .map(Vec::len)
            .sum()
    }

    fn filtered(&self, needle: &str) -> Self {
        let needle = needle.to_lowercase();
        let mut faculties = BTreeMap::new();
        for (faculty, subjects) in &self.faculties {
            let kept: BTreeMap<String, Vec<String>> = subjects
                .iter()
                .filter_map(|(subject, courses)| {
                    let matching: Vec<String> = courses
                        .iter()
                        .filter(|c| c.to_lowercase().contains(&needle))
                        .cloned()
                        .collect();
                    (!matching.is_empty()).then(|| (subject.clone(), matching))
                })
                .collect();
            if !kept.is_empty() {
                faculties.insert(faculty.clone(), kept);
            }
        }
        Self { faculties }
    }

    fn sort_courses(&mut self) {
        for courses in self.faculties.values_mut().flat_map(|s| s.values_mut()) {
            courses.sort_by(|a, b| compare_course_codes(a, b));
        }
    }

    fn rows(&self) -> Vec<CatalogRow<'_>> {
        let mut rows = Vec::new();
        for (faculty, subjects) in &self.faculties {
            for (subject, courses) in subjects {
                for course in courses {
                    rows.push(CatalogRow {
                        faculty,
                        subject,
                        course,
                    });
                }
            }
        }
        rows
    }
}

impl fmt::Display for GroupedCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (faculty, subjects) in &self.faculties {
            writeln!(f, "{}", faculty)?;
            for (subject, courses) in subjects {
                writeln!(f, "  {}", subject)?;
                for course in courses {
                    writeln!(f, "    {}", course)?;
                }
            }
        }
        Ok(())
    }
}

/// Faculty groups holding full course records, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NestedCatalog {
    faculties: Vec<FacultyGroup>,
}

impl NestedCatalog {
    pub fn faculties(&self) -> &[FacultyGroup] {
        &self.faculties
    }

    pub fn find_faculty(&self, faculty: &str) -> Option<&FacultyGroup> {
        self.faculties.iter().find(|f| f.faculty == faculty)
    }

    pub fn find_course(&self, id: &str) -> Option<&Course> {
        self.courses().find(|c| c.id == id)
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.faculties
            .iter()
            .flat_map(|f| f.subjects.iter())
            .flat_map(|s| s.courses.iter())
    }

    fn faculty_mut(&mut self, faculty: String) -> &mut FacultyGroup {
        let index = match self.faculties.iter().position(|f| f.faculty == faculty) {
            Some(index) => index,
            None => {
                self.faculties.push(FacultyGroup {
                    faculty,
                    subjects: Vec::new(),
                });
                self.faculties.len() - 1
            }
        };
        &mut self.faculties[index]
    }
}

fn subject_mut(group: &mut FacultyGroup, subject: String) -> &mut SubjectGroup {
    let index = match group.subjects.iter().position(|s| s.subject == subject) {
        Some(index) => index,
        None => {
            group.subjects.push(SubjectGroup {
                subject,
                courses: Vec::new(),
            });
            group.subjects.len() - 1
        }
    };
    &mut group.subjects[index]
}

impl Grouping for NestedCatalog {
    type Record = FacultyGroup;

    fn merge(&mut self, records: Vec<FacultyGroup>) {
        for record in records {
            let faculty = self.faculty_mut(record.faculty);
            for subject in record.subjects {
                subject_mut(faculty, subject.subject)
                    .courses
                    .extend(subject.courses);
            }
        }
    }

    fn course_count(&self) -> usize {
        self.courses().count()
    }

    fn filtered(&self, needle: &str) -> Self {
        let needle = needle.to_lowercase();
        let faculties = self
            .faculties
            .iter()
            .filter_map(|faculty| {
                let subjects: Vec<SubjectGroup> = faculty
                    .subjects
                    .iter()
                    .filter_map(|subject| {
                        let courses: Vec<Course> = subject
                            .courses
                            .iter()
                            .filter(|c| c.as_string.to_lowercase().contains(&needle))
                            .cloned()
                            .collect();
                        (!courses.is_empty()).then(|| SubjectGroup {
                            subject: subject.subject.clone(),
                            courses,
                        })
                    })
                    .collect();
                (!subjects.is_empty()).then(|| FacultyGroup {
                    faculty: faculty.faculty.clone(),
                    subjects,
                })
            })
            .collect();
        Self { faculties }
    }

    fn sort_courses(&mut self) {
        for subject in self.faculties.iter_mut().flat_map(|f| f.subjects.iter_mut()) {
            subject
                .courses
                .sort_by(|a, b| compare_course_codes(&a.as_string, &b.as_string));
        }
    }

    fn rows(&self) -> Vec<CatalogRow<'_>> {
        let mut rows = Vec::new();
        for faculty in &self.faculties {
            for subject in &faculty.subjects {
                for course in &subject.courses {
                    rows.push(CatalogRow {
                        faculty: &faculty.faculty,
                        subject: &subject.subject,
                        course: &course.as_string,
                    });
                }
            }
        }
        rows
    }
}

impl fmt::Display for NestedCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for faculty in &self.faculties {
            writeln!(f, "{}", faculty.faculty)?;
            for subject in &faculty.subjects {
                writeln!(f, "  {}", subject.subject)?;
                for course in &subject.courses {
                    writeln!(f, "    {} [{}]", course.as_string, course.id)?;
                }
            }
        }
        Ok(())
    }
}

/// Folds already-fetched pages into a fresh grouping.
pub fn load_pages<G: Grouping>(pages: impl IntoIterator<Item = Page<G::Record>>) -> G {
    let mut catalog = G::default();
    for page in pages {
        catalog.merge(page.objects);
    }
    catalog
}

pub struct PageFailure {
    pub page: u32,
    pub error: CatalogError,
}

pub struct LoadReport<G> {
    pub catalog: G,
    pub total_pages: u32,
    /// Course count the server reported on page 1, if it sent one.
    pub reported_courses: Option<u32>,
    /// Pages that could not be fetched. Their courses are missing from `catalog`.
    pub failures: Vec<PageFailure>,
}

impl<G> LoadReport<G> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct CatalogLoader {
    client: CatalogClient,
    progress: Option<ProgressBar>,
}

impl CatalogLoader {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Fetches page 1, then every remaining page at once, merging each as it
    /// lands. Only a failure on page 1 fails the whole load.
    pub async fn load<G: Grouping>(&self) -> Result<LoadReport<G>> {
        let first = self.client.fetch_page::<G::Record>(1).await?;
        let total_pages = first.total_pages.max(1);
        let reported_courses = first.num_results;
        if let Some(pb) = &self.progress {
            pb.set_length(total_pages as u64);
            pb.inc(1);
        }

        let remaining = remaining_pages(&first);
        let mut catalog = G::default();
        catalog.merge(first.objects);

        let client = &self.client;
        let mut pending: FuturesUnordered<_> = remaining
            .map(|page| async move { (page, client.fetch_page::<G::Record>(page).await) })
            .collect();

        let mut failures = Vec::new();
        while let Some((page, result)) = pending.next().await {
            match result {
                Ok(body) => catalog.merge(body.objects),
                Err(error) => {
                    warn!("Dropping catalog page {}: {}", page, error);
                    failures.push(PageFailure { page, error });
                }
            }
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
        info!(
            "Loaded {} of {:?} courses from {} pages ({} failed)",
            catalog.course_count(),
            reported_courses,
            total_pages,
            failures.len()
        );

        Ok(LoadReport {
            catalog,
            total_pages,
            reported_courses,
            failures,
        })
    }
}
