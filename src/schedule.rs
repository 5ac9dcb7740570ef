use crate::api::Course;

/// Courses the user has added, without duplicates, plus the cart badge count.
#[derive(Debug, Default)]
pub struct ScheduleList {
    courses: Vec<Course>,
    cart_count: usize,
}

impl ScheduleList {
    /// Returns `false` when an equal course is already in the list.
    pub fn add(&mut self, course: Course) -> bool {
        if self.courses.contains(&course) {
            return false;
        }
        self.courses.push(course);
        self.cart_count += 1;
        true
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn cart_count(&self) -> usize {
        self.cart_count
    }
}
