use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::directory::Directory;

use super::types::{DepartamentoObject, EmpleadoObject, GerenteObject};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Constant greeting.
    async fn hello(&self, ctx: &Context<'_>) -> Result<String> {
        Ok(ctx.data::<Directory>()?.hello().to_string())
    }

    /// Personalised greeting.
    async fn saludar(&self, ctx: &Context<'_>, name: String) -> Result<String> {
        Ok(ctx.data::<Directory>()?.greet(&name))
    }

    async fn empleados(&self, ctx: &Context<'_>) -> Result<Vec<EmpleadoObject>> {
        let employees = ctx
            .data::<Directory>()?
            .employees()
            .await
            .map_err(|e| e.extend())?;
        Ok(employees.into_iter().map(Into::into).collect())
    }

    /// Employees whose salary lies between `min` and `max`, inclusive.
    async fn empleados_por_sueldo(
        &self,
        ctx: &Context<'_>,
        min: f64,
        max: f64,
    ) -> Result<Vec<EmpleadoObject>> {
        let employees = ctx
            .data::<Directory>()?
            .employees_by_salary(min, max)
            .await
            .map_err(|e| e.extend())?;
        Ok(employees.into_iter().map(Into::into).collect())
    }

    /// Every department with employees and manager expanded.
    async fn departamentos(&self, ctx: &Context<'_>) -> Result<Vec<DepartamentoObject>> {
        let departments = ctx
            .data::<Directory>()?
            .departments()
            .await
            .map_err(|e| e.extend())?;
        Ok(departments.into_iter().map(Into::into).collect())
    }

    /// Describes whether a department matching `nombre` exists.
    async fn departamento(&self, ctx: &Context<'_>, nombre: String) -> Result<String> {
        Ok(ctx.data::<Directory>()?.describe_department(&nombre).await)
    }

    async fn gerentes(&self, ctx: &Context<'_>) -> Result<Vec<GerenteObject>> {
        let managers = ctx
            .data::<Directory>()?
            .managers()
            .await
            .map_err(|e| e.extend())?;
        Ok(managers.into_iter().map(Into::into).collect())
    }
}
