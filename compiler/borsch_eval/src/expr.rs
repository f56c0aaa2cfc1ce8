//! Expression evaluation and assignment through places.
//!
//! Operands are evaluated strictly left to right. Logical and comparison
//! operators evaluate both sides before dispatching; nothing
//! short-circuits.

use borsch_ir::{special, Expr, ExprKind, Place};
use borsch_runtime::errors::unpack_mismatch;
use borsch_runtime::operators::{binary, get_item, set_item, unary};
use borsch_runtime::{
    call_method, call_value, CallableKind, DictEntries, DictKey, EvalError, EvalResult, Value,
};
use borsch_stack::ensure_sufficient_stack;

use crate::evaluator::Evaluator;

/// A resolved assignment target.
///
/// Containers along the chain are evaluated once; `parent` remembers
/// where each one was read from so the updated container can be stored
/// back.
enum LValue {
    Name(String),
    Attr {
        owner: Value,
        name: String,
        parent: Option<Box<LValue>>,
    },
    Index {
        owner: Value,
        index: Value,
        parent: Option<Box<LValue>>,
    },
}

impl Evaluator<'_> {
    /// Evaluate an expression to a value.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Nil => Ok(Value::Nil),
            ExprKind::Int(v) => Ok(Value::Int(*v)),
            ExprKind::Real(v) => Ok(Value::Real(*v)),
            ExprKind::Bool(v) => Ok(Value::Bool(*v)),
            ExprKind::Str(v) => Ok(Value::string(v.as_str())),
            ExprKind::List(items) => Ok(Value::list(self.eval_all(items)?)),
            ExprKind::Dict(entries) => self.eval_dict(entries),
            ExprKind::Place(place) => self.read(place),
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(self.state, *op, &left, right)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                unary(self.state, *op, &operand)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::Lambda(def) => {
                let lambda = self.make_callable(def, CallableKind::Lambda)?;
                Ok(Value::callable(lambda))
            }
            ExprKind::Assign { targets, values } => self.eval_assign(targets, values),
        }
    }

    fn eval_all(&mut self, exprs: &[Expr]) -> Result<Vec<Value>, EvalError> {
        exprs.iter().map(|expr| self.eval(expr)).collect()
    }

    fn eval_dict(&mut self, entries: &[(Expr, Expr)]) -> EvalResult {
        let mut map = DictEntries::default();
        for (key, value) in entries {
            let key = self.eval(key)?;
            let value = self.eval(value)?;
            map.insert(DictKey::from_value(&key)?, (key, value));
        }
        Ok(Value::dict(map))
    }

    fn read(&mut self, place: &Place) -> EvalResult {
        match place {
            Place::Ident(name) => self.state.ctx.get_var(name),
            Place::Attr { base, name } => self.eval(base)?.get_attribute(name),
            Place::Index { base, index } => {
                let container = self.eval(base)?;
                let index = self.eval(index)?;
                get_item(self.state, &container, index)
            }
        }
    }

    /// Callee first, then the arguments.
    ///
    /// `x.m(...)` with a method-kind `m` passes `x` as the hidden receiver,
    /// unless `x` is a class or a package.
    fn eval_call(&mut self, callee: &Expr, args: &[Expr]) -> EvalResult {
        if let ExprKind::Place(Place::Attr { base, name }) = &callee.kind {
            let receiver = self.eval(base)?;
            let attribute = receiver.get_attribute(name)?;
            let args = self.eval_all(args)?;
            return match &attribute {
                Value::Callable(method)
                    if method.kind == CallableKind::Method
                        && !matches!(receiver, Value::Class(_) | Value::Package(_)) =>
                {
                    call_method(self.state, method, receiver, args)
                }
                _ => call_value(self.state, &attribute, name, args),
            };
        }

        let function = self.eval(callee)?;
        let args = self.eval_all(args)?;
        call_value(self.state, &function, &callee.to_string(), args)
    }

    /// `a = x` yields `x`; `a, b = ...` yields the list of assigned values.
    fn eval_assign(&mut self, targets: &[Place], values: &[Expr]) -> EvalResult {
        let values = match (targets, values) {
            ([target], [value]) => {
                let value = self.eval(value)?;
                return self.assign(target, value);
            }
            (_, [value]) => {
                let value = self.eval(value)?;
                unpack(&value, targets.len())?
            }
            _ if targets.len() == values.len() => self.eval_all(values)?,
            _ => return Err(unpack_mismatch(targets.len(), values.len())),
        };

        let mut assigned = Vec::with_capacity(values.len());
        for (target, value) in targets.iter().zip(values) {
            assigned.push(self.assign(target, value)?);
        }
        Ok(Value::list(assigned))
    }

    /// Bind `value` to `place` and yield it.
    pub(crate) fn assign(&mut self, place: &Place, value: Value) -> EvalResult {
        let target = self.resolve(place)?;
        self.store(&target, value.clone())?;
        Ok(value)
    }

    fn resolve(&mut self, place: &Place) -> Result<LValue, EvalError> {
        Ok(match place {
            Place::Ident(name) => LValue::Name(name.clone()),
            Place::Attr { base, name } => {
                let (owner, parent) = self.resolve_owner(base)?;
                LValue::Attr {
                    owner,
                    name: name.clone(),
                    parent,
                }
            }
            Place::Index { base, index } => {
                let (owner, parent) = self.resolve_owner(base)?;
                let index = self.eval(index)?;
                LValue::Index {
                    owner,
                    index,
                    parent,
                }
            }
        })
    }

    fn resolve_owner(&mut self, base: &Expr) -> Result<(Value, Option<Box<LValue>>), EvalError> {
        match &base.kind {
            ExprKind::Place(place) => {
                let link = self.resolve(place)?;
                let owner = self.load(&link)?;
                Ok((owner, Some(Box::new(link))))
            }
            _ => Ok((self.eval(base)?, None)),
        }
    }

    fn load(&mut self, link: &LValue) -> EvalResult {
        match link {
            LValue::Name(name) => self.state.ctx.get_var(name),
            LValue::Attr { owner, name, .. } => owner.get_attribute(name),
            LValue::Index { owner, index, .. } => get_item(self.state, owner, index.clone()),
        }
    }

    fn store(&mut self, link: &LValue, value: Value) -> Result<(), EvalError> {
        match link {
            LValue::Name(name) => self.state.ctx.set_var(name, value),
            LValue::Attr {
                owner,
                name,
                parent,
            } => {
                owner.set_attribute(name, value)?;
                self.write_back(parent.as_deref(), owner)
            }
            LValue::Index {
                owner,
                index,
                parent,
            } => {
                set_item(self.state, owner, index.clone(), value)?;
                self.write_back(parent.as_deref(), owner)
            }
        }
    }

    /// Store an updated container back into the link it was read from,
    /// if that link accepts writes.
    fn write_back(&mut self, parent: Option<&LValue>, container: &Value) -> Result<(), EvalError> {
        let Some(parent) = parent else {
            return Ok(());
        };
        let writable = match parent {
            // A name already aliases the container.
            LValue::Name(_) => false,
            LValue::Attr { owner, .. } => matches!(owner, Value::Object(_) | Value::Package(_)),
            LValue::Index { owner, .. } => owner.class().lookup(special::SET_ITEM).is_some(),
        };
        if writable {
            self.store(parent, container.clone())
        } else {
            Ok(())
        }
    }
}

/// Split a list result over `count` targets.
fn unpack(value: &Value, count: usize) -> Result<Vec<Value>, EvalError> {
    let Value::List(items) = value else {
        return Err(unpack_mismatch(count, 1));
    };
    let items = items.read();
    if items.len() != count {
        return Err(unpack_mismatch(count, items.len()));
    }
    Ok(items.clone())
}
