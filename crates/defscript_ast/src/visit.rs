//! Read-only traversal of the source tree.
//!
//! Every `visit_*` method of [Visit] defaults to the free function of the same
//! name, which walks into the node's children. Overriding a method and calling
//! the free function from it keeps the walk going.

use crate::source::{
    Block, CatchClause, Expr, ExprKind, Function, Program, Property, PropertyKind, Stmt, StmtKind,
};

/// A visitor over the source tree
pub trait Visit {
    type Err;

    fn visit_program(&mut self, program: &Program) -> Result<(), Self::Err> {
        visit_program(self, program)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), Self::Err> {
        visit_stmt(self, stmt)
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), Self::Err> {
        visit_block(self, block)
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), Self::Err> {
        visit_expr(self, expr)
    }

    fn visit_function(&mut self, function: &Function) -> Result<(), Self::Err> {
        visit_function(self, function)
    }

    fn visit_property(&mut self, property: &Property) -> Result<(), Self::Err> {
        visit_property(self, property)
    }

    fn visit_identifier(&mut self, _name: &str) -> Result<(), Self::Err> {
        Ok(())
    }
}

pub fn visit_program<V: Visit + ?Sized>(v: &mut V, program: &Program) -> Result<(), V::Err> {
    for stmt in &program.body {
        v.visit_stmt(stmt)?;
    }
    Ok(())
}

pub fn visit_block<V: Visit + ?Sized>(v: &mut V, block: &Block) -> Result<(), V::Err> {
    for stmt in &block.body {
        v.visit_stmt(stmt)?;
    }
    Ok(())
}

fn visit_catch_clause<V: Visit + ?Sized>(v: &mut V, clause: &CatchClause) -> Result<(), V::Err> {
    if let Some(param) = &clause.param {
        v.visit_expr(param)?;
    }
    v.visit_block(&clause.body)
}

pub fn visit_stmt<V: Visit + ?Sized>(v: &mut V, stmt: &Stmt) -> Result<(), V::Err> {
    match &stmt.kind {
        StmtKind::Expression(expr) | StmtKind::Throw(expr) => v.visit_expr(expr),
        StmtKind::Block(block) => v.visit_block(block),
        StmtKind::Empty | StmtKind::Break | StmtKind::Continue => Ok(()),
        StmtKind::If {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr(test)?;
            v.visit_stmt(consequent)?;
            if let Some(alternate) = alternate {
                v.visit_stmt(alternate)?;
            }
            Ok(())
        }
        StmtKind::While { test, body } | StmtKind::DoWhile { body, test } => {
            v.visit_expr(test)?;
            v.visit_stmt(body)
        }
        StmtKind::ForIn { left, right, body } | StmtKind::ForOf { left, right, body } => {
            v.visit_expr(left)?;
            v.visit_expr(right)?;
            v.visit_stmt(body)
        }
        StmtKind::Return(expr) | StmtKind::Yield(expr) => match expr {
            Some(expr) => v.visit_expr(expr),
            None => Ok(()),
        },
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            v.visit_block(block)?;
            if let Some(handler) = handler {
                visit_catch_clause(v, handler)?;
            }
            if let Some(finalizer) = finalizer {
                v.visit_block(finalizer)?;
            }
            Ok(())
        }
        StmtKind::VariableDeclaration(declarators) => {
            for declarator in declarators {
                v.visit_expr(&declarator.id)?;
                if let Some(init) = &declarator.init {
                    v.visit_expr(init)?;
                }
            }
            Ok(())
        }
        StmtKind::FunctionDeclaration { id, value } => {
            v.visit_expr(id)?;
            v.visit_function(value)
        }
        StmtKind::Assignment { left, right, .. } => {
            v.visit_expr(left)?;
            v.visit_expr(right)
        }
        StmtKind::Cascade {
            root, statements, ..
        } => {
            v.visit_expr(root)?;
            for stmt in statements {
                v.visit_stmt(stmt)?;
            }
            Ok(())
        }
    }
}

pub fn visit_expr<V: Visit + ?Sized>(v: &mut V, expr: &Expr) -> Result<(), V::Err> {
    match &expr.kind {
        ExprKind::Identifier(name) => v.visit_identifier(name),
        ExprKind::Literal(_) | ExprKind::This | ExprKind::VirtualObject => Ok(()),
        ExprKind::Array(items) | ExprKind::Sequence(items) => {
            for item in items {
                v.visit_expr(item)?;
            }
            Ok(())
        }
        ExprKind::Object(properties) => {
            for property in properties {
                v.visit_property(property)?;
            }
            Ok(())
        }
        ExprKind::Function(function) => v.visit_function(function),
        ExprKind::Unary { argument, .. } => v.visit_expr(argument),
        ExprKind::Await(argument) => v.visit_expr(argument),
        ExprKind::Binary { left, right, .. }
        | ExprKind::Logical { left, right, .. }
        | ExprKind::Assignment { left, right, .. } => {
            v.visit_expr(left)?;
            v.visit_expr(right)
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr(test)?;
            v.visit_expr(consequent)?;
            v.visit_expr(alternate)
        }
        ExprKind::Call { callee, arguments } | ExprKind::New { callee, arguments } => {
            v.visit_expr(callee)?;
            for argument in arguments {
                v.visit_expr(argument)?;
            }
            Ok(())
        }
        ExprKind::Member {
            object, property, ..
        } => {
            v.visit_expr(object)?;
            v.visit_expr(property)
        }
        ExprKind::CompareChain { expressions, .. } => {
            for expr in expressions {
                v.visit_expr(expr)?;
            }
            Ok(())
        }
        ExprKind::Yield { argument, .. } => match argument {
            Some(argument) => v.visit_expr(argument),
            None => Ok(()),
        },
    }
}

pub fn visit_function<V: Visit + ?Sized>(v: &mut V, function: &Function) -> Result<(), V::Err> {
    for param in &function.params {
        v.visit_expr(param)?;
    }
    v.visit_block(&function.body)
}

pub fn visit_property<V: Visit + ?Sized>(v: &mut V, property: &Property) -> Result<(), V::Err> {
    match &property.kind {
        PropertyKind::Assignment { key, value } => {
            v.visit_expr(key)?;
            v.visit_expr(value)
        }
        PropertyKind::Method { id, definition } => {
            v.visit_expr(id)?;
            v.visit_function(definition)
        }
    }
}
