use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    User,
    Course,
    Lesson,
    Question,
    Choice,
    Enrollment,
    Submission,
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

/// Insert and primary-key lookup shared by every table.
#[async_trait::async_trait]
pub trait CrudRepository<T, Create, V>
where
    T: ResourceTyped,
    V: Clone + Copy,
{
    async fn create(mm: &ModelManager, data: Create) -> DatabaseResult<T>;

    async fn find_by_id(mm: &ModelManager, id: V) -> DatabaseResult<Option<T>>;
}
