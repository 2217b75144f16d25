//! The Logical Query Representation (LQR) data model (spec §3).

mod condition;
mod ddl;
mod select;
mod statement;
mod value;

pub use condition::{Condition, Operator};
pub use ddl::{AlterAction, ColumnDef, ConstraintDef, ForeignKey, ForeignKeyRef};
pub use select::{
    AggregateFunction, ColumnRef, HavingClause, Join, JoinOn, JoinType, OrderDirection, OrderItem,
    ProjectionItem, SelectLqr, TableRef,
};
pub use statement::Lqr;
pub use value::Value;
