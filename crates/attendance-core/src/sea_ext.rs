use attendance_domain::pagination::{PageRequest, Sort};
use sea_orm::{ColumnTrait, EntityTrait, QueryOrder, QuerySelect, Select};

pub trait SelectExt {
    /// Order by `column` in the given direction.
    fn order_by_sort<C: ColumnTrait>(self, column: C, sort: Sort) -> Self;
    /// Apply `LIMIT`/`OFFSET` for the page.
    fn paginate_by(self, page: PageRequest) -> Self;
}

impl<E> SelectExt for Select<E>
where
    E: EntityTrait,
{
    fn order_by_sort<C: ColumnTrait>(self, column: C, sort: Sort) -> Self {
        match sort {
            Sort::Desc => self.order_by_desc(column),
            Sort::Asc => self.order_by_asc(column),
        }
    }

    fn paginate_by(self, page: PageRequest) -> Self {
        self.offset(page.offset()).limit(page.limit())
    }
}
