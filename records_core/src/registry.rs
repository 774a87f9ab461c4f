//! Registry
//!
//! Owns the three entity stores for one data directory and exposes the
//! service operations. Career and category deletions reload the dependent
//! stores from disk and run the integrity checks before removing anything.

use crate::error::RecordsResult;
use crate::integrity;
use crate::store::EntityStore;
use crate::types::{Career, CareerDraft, Category, CategoryDraft, Student, StudentDraft};
use std::path::{Path, PathBuf};

pub const STUDENTS_FILE: &str = "students.json";
pub const CAREERS_FILE: &str = "careers.json";
pub const CATEGORIES_FILE: &str = "categories.json";

#[derive(Debug)]
pub struct Registry {
    data_dir: PathBuf,
    students: EntityStore<Student>,
    careers: EntityStore<Career>,
    categories: EntityStore<Category>,
}

impl Registry {
    /// Open all stores under `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        log::info!("[registry] Using data directory {:?}", data_dir);

        Self {
            students: EntityStore::open(data_dir.join(STUDENTS_FILE)),
            careers: EntityStore::open(data_dir.join(CAREERS_FILE)),
            categories: EntityStore::open(data_dir.join(CATEGORIES_FILE)),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn students(&self) -> &EntityStore<Student> {
        &self.students
    }

    pub fn careers(&self) -> &EntityStore<Career> {
        &self.careers
    }

    pub fn categories(&self) -> &EntityStore<Category> {
        &self.categories
    }

    // ============================================================
    // STUDENTS
    // ============================================================

    pub fn create_student(&mut self, draft: StudentDraft) -> RecordsResult<Student> {
        self.students.create(draft)
    }

    pub fn get_student(&self, id: u64) -> RecordsResult<Student> {
        self.students.get(id).cloned()
    }

    /// Students whose career matches `career` case-insensitively, or all of them
    pub fn list_students(&self, career: Option<&str>) -> Vec<Student> {
        self.students.list(career)
    }

    pub fn delete_student(&mut self, id: u64) -> RecordsResult<Student> {
        self.students.remove(id)
    }

    // ============================================================
    // CAREERS
    // ============================================================

    pub fn create_career(&mut self, draft: CareerDraft) -> RecordsResult<Career> {
        self.careers.create(draft)
    }

    pub fn get_career(&self, id: u64) -> RecordsResult<Career> {
        self.careers.get(id).cloned()
    }

    pub fn list_careers(&self, name: Option<&str>) -> Vec<Career> {
        self.careers.list(name)
    }

    /// Delete a career unless a student is still enrolled in it
    pub fn delete_career(&mut self, id: u64) -> RecordsResult<Career> {
        self.students.reload();
        self.careers.reload();

        let career = self.careers.get(id)?;
        integrity::ensure_career_deletable(career, self.students.records())?;

        self.careers.remove(id)
    }

    // ============================================================
    // CATEGORIES
    // ============================================================

    pub fn create_category(&mut self, draft: CategoryDraft) -> RecordsResult<Category> {
        self.categories.create(draft)
    }

    pub fn get_category(&self, id: u64) -> RecordsResult<Category> {
        self.categories.get(id).cloned()
    }

    pub fn list_categories(&self, name: Option<&str>) -> Vec<Category> {
        self.categories.list(name)
    }

    /// Delete a category unless a career still belongs to it
    pub fn delete_category(&mut self, id: u64) -> RecordsResult<Category> {
        self.students.reload();
        self.careers.reload();
        self.categories.reload();

        let category = self.categories.get(id)?;
        integrity::ensure_category_deletable(category, self.careers.records())?;

        self.categories.remove(id)
    }
}
