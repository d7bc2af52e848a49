use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::directory::Directory;

use super::types::{
    DepartamentoInput, DepartamentoObject, EmpleadoInput, EmpleadoObject, GerenteInput,
    GerenteObject,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a department, creating its inline employees first.
    async fn create_departamento(
        &self,
        ctx: &Context<'_>,
        input: DepartamentoInput,
    ) -> Result<DepartamentoObject> {
        let department = ctx
            .data::<Directory>()?
            .create_department(input.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(department.into())
    }

    async fn create_empleado(
        &self,
        ctx: &Context<'_>,
        input: EmpleadoInput,
    ) -> Result<EmpleadoObject> {
        let employee = ctx
            .data::<Directory>()?
            .create_employee(input.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(employee.into())
    }

    /// Create a manager; fails if the email is already taken.
    async fn create_gerente(&self, ctx: &Context<'_>, input: GerenteInput) -> Result<GerenteObject> {
        let manager = ctx
            .data::<Directory>()?
            .create_manager(input.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(manager.into())
    }
}
