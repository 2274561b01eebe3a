//! Table admin handlers. Every one of them requires a logged-in user.
//!
//! The table segment is resolved against the allow-list before anything
//! else happens, so an unknown name is a `404` without a query being run.

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};

use super::flash::{self, Flash};
use super::render;
use super::session::CurrentUser;
use super::state::WebState;
use super::view::{encode_segment, FormAction, FormView, Page};
use crate::domain::{FormFields, TableName};
use crate::error::{CrudError, Error, Result};

fn table_path(table: &TableName) -> String {
    format!("/tables/{}", encode_segment(table.as_str()))
}

/// Failures that send the user back to the table view instead of the form.
fn redirects_to_table(err: &CrudError) -> bool {
    matches!(
        err,
        CrudError::MissingPrimaryKey { .. } | CrudError::RecordNotFound { .. }
    )
}

pub async fn index(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<WebState>,
) -> Result<HttpResponse> {
    let crud = state.crud.clone();
    let tables = web::block(move || crud.list_tables()).await??;
    Ok(render::page(&req, Some(&user), &Page::TableIndex(&tables)))
}

pub async fn view(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<WebState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let table = state.crud.resolve(&path.into_inner())?;
    let crud = state.crud.clone();
    let view = web::block(move || crud.view_table(table.as_str())).await??;
    Ok(render::page(&req, Some(&user), &Page::Table(&view)))
}

pub async fn create_form(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<WebState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let table = state.crud.resolve(&path.into_inner())?;
    let crud = state.crud.clone();
    let name = table.clone();
    let schema = web::block(move || crud.get_schema(name.as_str())).await??;

    let form = FormView {
        table: &table,
        schema: &schema,
        hooks: state.crud.hooks(),
        action: FormAction::Create,
        values: FormFields::new(),
    };
    Ok(render::page(&req, Some(&user), &Page::Form(form)))
}

pub async fn create(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<WebState>,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let table = state.crud.resolve(&path.into_inner())?;
    let fields = FormFields::from(form.into_inner());

    let crud = state.crud.clone();
    let name = table.clone();
    let submitted = fields.clone();
    match web::block(move || crud.create(name.as_str(), &submitted)).await? {
        Ok(table) => Ok(flash::redirect(
            &table_path(&table),
            Flash::success("Record created successfully."),
        )),
        Err(err) if err.is_user_facing() => {
            redisplay(&req, &user, &state, table, FormAction::Create, fields, err).await
        }
        Err(err) => Err(Error::from(err)),
    }
}

pub async fn edit_form(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<WebState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (name, id) = path.into_inner();
    let table = state.crud.resolve(&name)?;

    let crud = state.crud.clone();
    let record_id = id.clone();
    match web::block(move || crud.edit_form(table.as_str(), &record_id)).await? {
        Ok(edit) => {
            let form = FormView::from_record(
                &edit.table,
                &edit.schema,
                state.crud.hooks(),
                &id,
                &edit.record,
            );
            Ok(render::page(&req, Some(&user), &Page::Form(form)))
        }
        Err(err) if redirects_to_table(&err) => {
            let table = state.crud.resolve(&name)?;
            Ok(flash::redirect(&table_path(&table), Flash::error(err.to_string())))
        }
        Err(err) => Err(Error::from(err)),
    }
}

pub async fn edit(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<WebState>,
    path: web::Path<(String, String)>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let (name, id) = path.into_inner();
    let table = state.crud.resolve(&name)?;
    let fields = FormFields::from(form.into_inner());

    let crud = state.crud.clone();
    let target = table.clone();
    let record_id = id.clone();
    let submitted = fields.clone();
    match web::block(move || crud.edit(target.as_str(), &record_id, &submitted)).await? {
        Ok(table) => Ok(flash::redirect(
            &table_path(&table),
            Flash::success("Record updated successfully."),
        )),
        Err(err) if redirects_to_table(&err) => {
            Ok(flash::redirect(&table_path(&table), Flash::error(err.to_string())))
        }
        Err(err) if err.is_user_facing() => {
            let action = FormAction::Edit { id };
            redisplay(&req, &user, &state, table, action, fields, err).await
        }
        Err(err) => Err(Error::from(err)),
    }
}

pub async fn delete(
    state: web::Data<WebState>,
    _user: CurrentUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (name, id) = path.into_inner();
    let table = state.crud.resolve(&name)?;

    let crud = state.crud.clone();
    let target = table.clone();
    match web::block(move || crud.delete(target.as_str(), &id)).await? {
        Ok(table) => Ok(flash::redirect(
            &table_path(&table),
            Flash::success("Record deleted successfully."),
        )),
        Err(err) if err.is_user_facing() => {
            Ok(flash::redirect(&table_path(&table), Flash::error(err.to_string())))
        }
        Err(err) => Err(Error::from(err)),
    }
}

/// Show the form again with the submitted values and the error message.
async fn redisplay(
    req: &HttpRequest,
    user: &CurrentUser,
    state: &web::Data<WebState>,
    table: TableName,
    action: FormAction,
    values: FormFields,
    err: CrudError,
) -> Result<HttpResponse> {
    let crud = state.crud.clone();
    let name = table.clone();
    let schema = web::block(move || crud.get_schema(name.as_str())).await??;

    let form = FormView {
        table: &table,
        schema: &schema,
        hooks: state.crud.hooks(),
        action,
        values,
    };
    Ok(render::form_error(req, Some(user), err.to_string(), &Page::Form(form)))
}
